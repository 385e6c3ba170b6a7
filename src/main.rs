use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod app;
mod config;

mod domain {
    pub mod entities {
        pub mod cell;
        pub mod merge_table;
        pub mod session;
        pub mod sheet;
    }
}

mod usecase {
    pub mod ports {
        pub mod codec;
    }
    pub mod services {
        pub mod export_service;
        pub mod import_service;
    }
}

mod infra {
    pub mod export {
        pub mod xlsx;
    }
    pub mod fs {
        pub mod files;
    }
    pub mod import {
        pub mod csv;
        pub mod decoder;
        pub mod xlsx;
    }
}

mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

mod ui {
    pub mod state {
        pub mod app_state;
    }
}


fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_logging();

    let webview_data_dir = match config::default_webview_data_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("failed to prepare webview data dir: {err:#}");
            MessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title("Excel 合并工具")
                .set_description(format!("无法建立资料目录：{err:#}"))
                .set_buttons(MessageButtons::Ok)
                .show();
            return;
        }
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Excel 合并工具"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
