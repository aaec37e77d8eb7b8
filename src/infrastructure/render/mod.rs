//! Render Layer - 阅读页 HTML 渲染
//!
//! - address: 地址栏参数（阅读位置 + 展示偏好）的编码
//! - layout: 页面骨架、目录选择器、章节导航、提示页
//! - host_sync / client_local: 两种 PagePresenter 策略
//! - editor: 编辑视图

mod address;
mod client_local;
mod editor;
mod host_sync;
mod layout;

use std::sync::Arc;

pub use address::{encode_component, ReaderAddress};
pub use client_local::ClientLocalPresenter;
pub use editor::{editor_page, Notice};
pub use host_sync::HostSyncPresenter;
pub use layout::{message_page, reader_page};

use crate::application::ports::{PagePresenterPort, RenderMode};

/// 按展示模式选择 Presenter
#[derive(Clone)]
pub struct Presenters {
    host: Arc<dyn PagePresenterPort>,
    client: Arc<dyn PagePresenterPort>,
}

impl Presenters {
    pub fn new() -> Self {
        Self {
            host: Arc::new(HostSyncPresenter),
            client: Arc::new(ClientLocalPresenter),
        }
    }

    pub fn get(&self, mode: RenderMode) -> &dyn PagePresenterPort {
        match mode {
            RenderMode::Host => self.host.as_ref(),
            RenderMode::Client => self.client.as_ref(),
        }
    }
}

impl Default for Presenters {
    fn default() -> Self {
        Self::new()
    }
}
