//! Visualization: Prime Spiral Viewer
//!
//! Shows one generated spiral as a pixelated texture with a census panel.
//! W/A/S/D pan, Up/Down zoom, Escape quits.
//!
//! Run: cargo run --release --bin viz_spiral [-- --algorithm ulam --size 501]

use clap::Parser;
use eframe::egui;
use egui::ColorImage;
use egui_plot::{Bar, BarChart, Plot};
use prime_spirals::analysis::SpiralReport;
use prime_spirals::viz_common::{self, format_num, Pan, SpiralArgs, ViewState};
use prime_spirals::{color_of, Algorithm, Bucket};

const WINDOW_SIZE: [f32; 2] = [1920.0, 1080.0];
const SIDE_PANEL_WIDTH: f32 = 260.0;
/// Larger textures are rejected by most GPU backends.
const MAX_TEXTURE_SIDE: usize = 8192;

#[derive(Parser)]
#[command(name = "viz_spiral", about = "Interactive prime spiral viewer")]
struct ViewerCli {
    #[command(flatten)]
    spiral: SpiralArgs,
}

struct SpiralApp {
    algorithm: Algorithm,
    size: i64,
    dim: usize,
    image_data: ColorImage,
    texture: Option<egui::TextureHandle>,
    report: SpiralReport,
    view: ViewState,
}

impl SpiralApp {
    fn new(_cc: &eframe::CreationContext<'_>, args: &SpiralArgs, image_data: ColorImage, report: SpiralReport) -> Self {
        let dim = image_data.size[0];
        Self {
            algorithm: args.algorithm,
            size: args.size,
            dim,
            image_data,
            texture: None,
            report,
            view: ViewState::new(args.size, [WINDOW_SIZE[0] - SIDE_PANEL_WIDTH, WINDOW_SIZE[1]]),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (quit, left, right, up, down, zoom_in, zoom_out) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_down(egui::Key::A),
                i.key_down(egui::Key::D),
                i.key_down(egui::Key::W),
                i.key_down(egui::Key::S),
                i.key_down(egui::Key::ArrowUp),
                i.key_down(egui::Key::ArrowDown),
            )
        });

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if left {
            self.view.pan(Pan::Left);
        }
        if right {
            self.view.pan(Pan::Right);
        }
        if up {
            self.view.pan(Pan::Up);
        }
        if down {
            self.view.pan(Pan::Down);
        }
        if zoom_in {
            self.view.zoom_in();
        }
        if zoom_out {
            self.view.zoom_out();
        }
        if left || right || up || down || zoom_in || zoom_out {
            ctx.request_repaint();
        }
    }

    fn side_panel(&self, ui: &mut egui::Ui) {
        ui.heading(format!("{} Spiral", self.algorithm.name()));
        ui.label(format!("Size: {}", format_num(self.size as usize)));
        ui.label(format!("Grid: {} x {}", self.dim, self.dim));
        ui.label(format!("Display: {:.0} px", self.view.display_size));
        ui.separator();

        for (bucket, count) in self.report.numbers.rows() {
            let [r, g, b] = color_of(bucket);
            let swatch = if bucket == Bucket::None {
                egui::Color32::DARK_GRAY
            } else {
                egui::Color32::from_rgb(r, g, b)
            };
            ui.horizontal(|ui| {
                ui.colored_label(swatch, "■");
                ui.label(format!("{:<12} {}", bucket.label(), format_num(count)));
            });
        }
        ui.separator();

        let bars: Vec<Bar> = self
            .report
            .pixels
            .rows()
            .into_iter()
            .filter(|&(bucket, _)| bucket != Bucket::None)
            .enumerate()
            .map(|(i, (bucket, count))| {
                let [r, g, b] = color_of(bucket);
                Bar::new(i as f64, count as f64)
                    .width(0.8)
                    .name(bucket.label())
                    .fill(egui::Color32::from_rgb(r, g, b))
            })
            .collect();

        ui.label("Visible pixels per bucket");
        Plot::new("census_plot")
            .height(200.0)
            .show_axes([false, true])
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Pixels"));
            });

        ui.separator();
        ui.label("W/A/S/D: pan   Up/Down: zoom   Esc: quit");
    }
}

impl eframe::App for SpiralApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.texture.is_none() {
            self.texture = Some(ctx.load_texture(
                "spiral_tex",
                self.image_data.clone(),
                egui::TextureOptions::NEAREST,
            ));
        }

        self.handle_keys(ctx);

        egui::SidePanel::left("spiral_info")
            .exact_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| self.side_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let area = ui.max_rect();
                self.view.set_window([area.width(), area.height()]);

                if let Some(tex) = &self.texture {
                    let rect = egui::Rect::from_min_size(
                        area.min + egui::vec2(self.view.pos[0], self.view.pos[1]),
                        egui::vec2(self.view.display_size, self.view.display_size),
                    );
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter_at(area).image(tex.id(), rect, uv, egui::Color32::WHITE);
                }
            });
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = ViewerCli::parse();
    let (generator, grid) = match viz_common::generate(&cli.spiral) {
        Ok(generated) => generated,
        Err(e) => {
            log::error!("Cannot build spiral: {}", e);
            std::process::exit(1);
        }
    };
    if grid.dim() > MAX_TEXTURE_SIDE {
        log::error!(
            "Grid is {} px wide; textures above {} px are not supported, use a smaller --size",
            grid.dim(),
            MAX_TEXTURE_SIDE
        );
        std::process::exit(1);
    }

    let report = SpiralReport::from_grid(generator.as_ref(), &grid);
    let image = viz_common::to_color_image(&grid);
    drop(grid);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "Prime Spirals",
        native_options,
        Box::new(move |cc| Ok(Box::new(SpiralApp::new(cc, &cli.spiral, image, report)))),
    )
}
