use bo_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::{Any, TypeId};

#[derive(Debug)]
struct Sample(u8);

impl FeatureSlice for Sample {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Other;

impl FeatureSlice for Other {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn initialized_slice_keeps_type_identity() {
    let slice = InitializedSlice::new(Sample(7));

    assert_eq!(slice.id, TypeId::of::<Sample>());
    assert!(slice.name.ends_with("Sample"));
    assert_eq!(slice.downcast_ref::<Sample>().map(|s| s.0), Some(7));
    assert!(slice.downcast_ref::<Other>().is_none());
}
