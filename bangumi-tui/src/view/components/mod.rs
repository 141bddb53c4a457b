//! 界面组件

pub mod modal;
pub mod statusbar;
pub mod tabs;
