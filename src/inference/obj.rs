use indexmap::IndexMap;
use super::U;

#[derive(Clone, Debug, Default)]
pub struct ObjC {
    /// First-sighting order.
    pub fields: IndexMap<String, FieldC>,
    pub seen_objects: u64,
}

#[derive(Clone, Debug, Default)]
pub struct FieldC {
    pub ty: U,
    pub present_in: u64, // key is "required" when present in every object
}

impl ObjC {
    pub(super) fn join(a: &Self, b: &Self) -> Self {
        let mut out = Self::default();
        out.seen_objects = a.seen_objects + b.seen_objects;

        // merge keys from a
        for (k, fa) in &a.fields {
            let merged = match b.fields.get(k) {
                None => fa.clone(),
                Some(fb) => FieldC {
                    ty: super::join(&fa.ty, &fb.ty),
                    present_in: fa.present_in + fb.present_in,
                },
            };
            out.fields.insert(k.clone(), merged);
        }
        // add keys only in b
        for (k, fb) in &b.fields {
            if !out.fields.contains_key(k) {
                out.fields.insert(k.clone(), fb.clone());
            }
        }

        out
    }
}
