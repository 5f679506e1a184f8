//! C'est La Wheat: look up food products on Open Food Facts and check
//! whether they likely contain gluten.

pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod dispatch;
pub mod gluten;
pub mod lookup;
pub mod product;
pub mod render;
pub mod scanner;
pub mod session;
pub mod spinner;
