pub mod model_loader;
pub mod prediction_service;
pub mod system;
pub mod training;
