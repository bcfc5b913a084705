use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn title(&self) -> &str;
    fn is_available(&self) -> bool;
}
