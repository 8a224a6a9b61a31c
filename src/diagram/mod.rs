pub mod fingerboard;
pub mod keyboard;
