//! Template inference.
//!
//! Stream documents in, accumulate per-kind evidence, join it, and lower
//! the result into a [`StructureTemplate`] every observed document
//! satisfies.
//!
//! Design goals:
//! - Join ⊔ is associative/commutative/idempotent → order-independent
//!   (apart from key order, which follows first sighting).
//! - Only keep what every sample agrees on: keys missing from some mapping
//!   and keys whose type varies are dropped rather than guessed.
//! - A document validated against the template inferred from it alone
//!   produces no mismatches.
pub mod arr;
pub mod obj;

use std::collections::BTreeSet;
use serde_json::{Map, Value};

use crate::document::{type_tag_of, TypeTag};
use crate::template::{ShapeTemplate, StructureTemplate};

pub use arr::ArrC;
pub use obj::{FieldC, ObjC};

// ------------------------------ State ------------------------------------- //

/// Evidence for one slot. At most one arm per kind.
#[derive(Clone, Debug, Default)]
pub struct U {
    /// Scalar kinds seen (string, number, boolean, null).
    pub scalars: BTreeSet<TypeTag>,
    pub arr: Option<ArrC>,
    pub obj: Option<ObjC>,
}

impl U {
    pub fn empty() -> Self { Self::default() }
    pub fn is_bottom(&self) -> bool {
        self.scalars.is_empty() && self.arr.is_none() && self.obj.is_none()
    }
    fn arms(&self) -> usize {
        self.scalars.len() + usize::from(self.arr.is_some()) + usize::from(self.obj.is_some())
    }
}

// ------------------------------ Observe ----------------------------------- //

pub fn observe_value(v: &Value) -> U {
    match v {
        Value::Array(xs) => observe_array(xs),
        Value::Object(m) => observe_object(m),
        scalar => U { scalars: BTreeSet::from([type_tag_of(scalar)]), ..U::default() },
    }
}

fn observe_array(xs: &[Value]) -> U {
    let mut item = U::empty();
    for el in xs { item = join(&item, &observe_value(el)); }
    U { arr: Some(ArrC { item: Box::new(item), samples: 1 }), ..U::default() }
}

fn observe_object(map: &Map<String, Value>) -> U {
    let mut obj = ObjC { seen_objects: 1, ..ObjC::default() };
    for (k, v) in map {
        obj.fields.insert(k.clone(), FieldC { ty: observe_value(v), present_in: 1 });
    }
    U { obj: Some(obj), ..U::default() }
}

// -------------------------------- Join (⊔) -------------------------------- //

pub fn join(a: &U, b: &U) -> U {
    let mut out = U::empty();

    out.scalars = &a.scalars | &b.scalars;

    out.arr = match (&a.arr, &b.arr) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => Some(ArrC::join(x, y)),
    };

    out.obj = match (&a.obj, &b.obj) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => Some(ObjC::join(x, y)),
    };

    out
}

// ------------------------------- Lowering --------------------------------- //

/// Template for a slot, or `None` when the evidence disagrees with itself.
pub fn lower(u: &U) -> Option<ShapeTemplate> {
    if u.arms() != 1 {
        return None;
    }
    if let Some(obj) = &u.obj {
        return Some(ShapeTemplate::Map(lower_fields(obj)));
    }
    if let Some(arr) = &u.arr {
        // no element evidence (or mixed elements): only the container kind is known
        return Some(match lower(&arr.item) {
            Some(item) => ShapeTemplate::Array(Box::new(item)),
            None => ShapeTemplate::Leaf(TypeTag::Sequence),
        });
    }
    u.scalars.first().copied().map(ShapeTemplate::Leaf)
}

fn lower_fields(obj: &ObjC) -> StructureTemplate {
    obj.fields
        .iter()
        .filter(|(_, f)| f.present_in == obj.seen_objects)
        .filter_map(|(k, f)| lower(&f.ty).map(|t| (k.clone(), t)))
        .collect()
}

// ------------------------------- Front API -------------------------------- //

#[derive(Default)]
pub struct Inference { state: U }

impl Inference {
    pub fn new() -> Self { Self { state: U::empty() } }

    pub fn observe_value(&mut self, v: &Value) {
        let obs = observe_value(v);
        self.state = join(&self.state, &obs);
    }

    /// Template shared by every observed document. Empty unless every
    /// document was a mapping.
    pub fn solve(&self) -> StructureTemplate {
        match (&self.state.obj, self.state.arms()) {
            (Some(obj), 1) => lower_fields(obj),
            _ => StructureTemplate::new(),
        }
    }
}

pub fn infer_template(doc: &Value) -> StructureTemplate {
    infer_from_documents([doc])
}

pub fn infer_from_documents<'a, I>(docs: I) -> StructureTemplate
where
    I: IntoIterator<Item = &'a Value>
{
    let mut inf = Inference::new();
    for doc in docs {
        inf.observe_value(doc);
    }
    inf.solve()
}
