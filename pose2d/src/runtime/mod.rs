mod person;
mod session;
mod skeleton;

pub use person::*;
pub use session::*;
pub use skeleton::*;

#[cfg(test)]
pub(crate) mod test_support;
