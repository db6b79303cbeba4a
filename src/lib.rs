pub mod errors;
pub mod model;
pub mod nav;
pub mod remote;
pub mod roles;
pub mod session;
pub mod store;
