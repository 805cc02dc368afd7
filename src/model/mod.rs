pub mod fixture;
pub mod overrides;
pub mod raw;
pub mod squiggle;
