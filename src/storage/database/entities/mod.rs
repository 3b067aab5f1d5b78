/// Business entity module
pub mod business;
/// Category entity module
pub mod category;
/// Neighbourhood entity module
pub mod neighbourhood;

pub use business::Entity as Business;
pub use category::Entity as Category;
pub use neighbourhood::Entity as Neighbourhood;
