// UI module - terminal front end
//
// This module contains:
// - InputBridge: Feeds blocking stdin lines into the async event loop
// - TerminalController: Parses commands and wires them to the game and audio
// - render: Pure functions producing the French text shown to the player

pub mod bridge;
pub mod controller;
pub mod render;

pub use bridge::InputBridge;
pub use controller::{Response, TerminalController};
