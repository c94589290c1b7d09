pub mod bundle;
pub mod diff;
pub mod run;
