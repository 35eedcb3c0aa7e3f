pub mod component;
pub mod registration;
pub mod text_input;

pub use component::Component;
pub use registration::RegistrationComponent;
