pub mod settings;

pub use settings::{
    AppSettings, BackendSettings, Environment, HttpSettings, RankedSettings, ReferenceSettings,
    ReplaySettings, Settings,
};
