pub mod availability;
pub mod dispatch;
pub mod impl_fake;
pub mod impl_tract;
pub mod interface;
pub mod models;
pub mod tract;

#[cfg(test)]
pub mod test;
