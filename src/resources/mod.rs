//! Long lived data injected into the world.

pub mod animationstore;
pub mod assets;
pub mod audio;
pub mod camera2d;
pub mod contacts;
pub mod debugmode;
pub mod fullscreen;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod rendertarget;
pub mod screensize;
pub mod statehooks;
pub mod windowsize;
pub mod worldsignals;
pub mod worldtime;
