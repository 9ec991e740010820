//! 各页面的数据加载逻辑
//!
//! 不依赖 DOM，前端组件只负责把结果写入信号并渲染。

pub mod access;
pub mod dashboard;
pub mod detail;
pub mod explore;
pub mod home;
pub mod profile;
pub mod upload;
