pub mod houses;
pub mod signs;

pub use houses::house_of;
pub use signs::{
    sign_of, signs_of_element, signs_of_modality, Element, Modality, Placement, Sign, SignMeta,
    SignPlacement, SIGNS,
};
