pub mod wordfall;
