mod input;
mod keygen;
mod selftest;
mod sign;
mod verify;

pub use keygen::KeygenCommand;
pub use selftest::SelftestCommand;
pub use sign::SignCommand;
pub use verify::VerifyCommand;
