pub mod error;
pub mod misc;
pub mod patient;

pub use error::{ApiError, ApiJson, ApiPath, ApiQuery};
pub use misc::{about, greet, root};
pub use patient::{
    create_patient, delete_patient, get_patient, list_patients, sort_patients, update_patient,
};
