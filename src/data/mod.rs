pub mod profiles;

pub use profiles::{
    load_profile_catalog, ActorProfile, OvertimeSpec, ProfileCatalog, ProfileDataError,
};
