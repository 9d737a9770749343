use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use eframe::egui;
use eframe::egui::load::Bytes;

use crate::data::format::StyledTable;
use crate::error::{Error, Result};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// What the viewer window displays.
pub enum ViewerContent {
    /// A saved figure; `uri` keys the decoded texture.
    Image { uri: String, bytes: Bytes },
    Table(StyledTable),
}

pub struct ViewerApp {
    pub title: String,
    pub content: ViewerContent,
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: caption ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.title, &self.content);
        });

        // ---- Central panel: figure or table ----
        egui::CentralPanel::default().show(ctx, |ui| match &self.content {
            ViewerContent::Image { uri, bytes } => plot::image_view(ui, uri, bytes),
            ViewerContent::Table(table) => panels::table_view(ui, table),
        });
    }
}

/// Show a saved image in a window. Blocks until the window is closed.
pub fn show_image(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    run_viewer(ViewerApp {
        title,
        content: ViewerContent::Image {
            uri: format!("bytes://{}", path.display()),
            bytes: Bytes::from(bytes),
        },
    })
}

/// Show a styled table in a window. Blocks until the window is closed.
pub fn show_table(table: StyledTable) -> Result<()> {
    run_viewer(ViewerApp {
        title: table.caption().to_string(),
        content: ViewerContent::Table(table),
    })
}

/// Run the native window. Backends that cannot reach a display panic inside
/// winit; that panic is reported as [`Error::Viewer`].
fn run_viewer(app: ViewerApp) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    let window_title = app.title.clone();
    let outcome = panic::catch_unwind(AssertUnwindSafe(move || {
        eframe::run_native(
            &window_title,
            options,
            Box::new(|cc| {
                // Install image loaders so egui can decode png/jpg/bmp bytes.
                egui_extras::install_image_loaders(&cc.egui_ctx);
                Ok(Box::new(app))
            }),
        )
    }));

    match outcome {
        Ok(result) => result.map_err(|e| Error::Viewer(e.to_string())),
        Err(payload) => Err(Error::Viewer(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "viewer panicked".to_string()
    }
}
