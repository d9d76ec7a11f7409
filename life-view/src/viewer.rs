//! Interactive toroidal Game of Life viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state (the
//! [`Universe`]) and implements [`eframe::App`] to render the grid and
//! drive the engine through an egui UI. The viewer is a pure frontend:
//! every rule of the simulation lives in `life-core`, and the grid is
//! drawn straight from the packed byte view returned by
//! [`Universe::cells`].

use eframe::App;
use life_core::patterns::{self, Pattern};
use life_core::universe::Universe;
use log::info;
use rand::rngs::ThreadRng;

/// Edge length of a drawn cell in pixels.
const CELL_SIZE: f32 = 10.0;

/// Width of the grid line separating cells in pixels.
const GRID_LINE: f32 = 1.0;

/// Live-cell probability used by the Randomize button.
const RANDOM_FILL: f64 = 0.5;

const GRID_COLOR: egui::Color32 = egui::Color32::from_gray(60);
const DEAD_COLOR: egui::Color32 = egui::Color32::from_gray(25);
const ALIVE_COLOR: egui::Color32 = egui::Color32::LIGHT_GREEN;

/// What a click on the grid does.
#[derive(Clone, Copy)]
enum ClickTool {
    /// Flip the clicked cell between alive and dead.
    Toggle,
    /// Stamp a pattern centered on the clicked cell.
    Stamp(&'static Pattern),
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: a single [`Universe`].
/// - UI state (run/pause, stepping speed, click tool).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If `running`, call [`Universe::tick`] `ticks_per_frame` times.
/// 3. Paint every cell from the packed buffer.
///
/// ### Fields
/// - `universe` - The simulated grid.
/// - `rng` - Random number generator behind the Randomize button.
/// - `running` - Whether the simulation is auto-advancing.
/// - `ticks_per_frame` - Generations per repaint while running (1..=100).
/// - `generation` - Generations stepped since the last seed/clear.
/// - `tool` - Active click tool (toggle or pattern stamp).
pub struct Viewer {
    universe: Universe,
    rng: ThreadRng,

    running: bool,
    ticks_per_frame: u32,
    generation: u64,

    tool: ClickTool,
}

impl Viewer {
    /// Creates a viewer around a randomized default universe.
    ///
    /// The universe starts at the default 64x64 size with roughly half
    /// of the cells alive, and the simulation is running, so launching
    /// the app immediately shows motion.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to
    /// `eframe::run_native`.
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let mut universe = Universe::default();
        universe.randomize(RANDOM_FILL, &mut rng);

        info!(
            "starting with a {}x{} universe",
            universe.width(),
            universe.height()
        );

        Self {
            universe,
            rng,
            running: true,
            ticks_per_frame: 1,
            generation: 0,
            tool: ClickTool::Toggle,
        }
    }

    /// Re-seeds the grid randomly and restarts the generation count.
    fn randomize(&mut self) {
        self.universe.randomize(RANDOM_FILL, &mut self.rng);
        self.generation = 0;
    }

    /// Kills every cell and restarts the generation count.
    ///
    /// Resizing to the current width is the engine's reset: it discards
    /// all cells while keeping the dimensions.
    fn clear(&mut self) {
        let width = self.universe.width();
        self.universe.set_width(width);
        self.generation = 0;
    }

    /// Advances the simulation by `ticks` generations.
    fn step(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.universe.tick();
        }
        self.generation += u64::from(ticks);
    }

    /// Distance in pixels between the top-left corners of adjacent cells.
    fn grid_pitch(&self) -> f32 {
        CELL_SIZE + GRID_LINE
    }

    /// Maps a screen position to the grid cell under it.
    ///
    /// ### Parameters
    /// - `pos` - Screen position in egui coordinates.
    /// - `origin` - Top-left corner of the drawn grid.
    ///
    /// ### Returns
    /// `Some((row, col))` for positions inside the grid, `None` outside.
    fn cell_at(&self, pos: egui::Pos2, origin: egui::Pos2) -> Option<(usize, usize)> {
        let pitch = self.grid_pitch();
        let x = pos.x - origin.x - GRID_LINE;
        let y = pos.y - origin.y - GRID_LINE;
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let col = (x / pitch) as usize;
        let row = (y / pitch) as usize;
        if row >= self.universe.height() || col >= self.universe.width() {
            return None;
        }
        Some((row, col))
    }

    /// Applies the active click tool at the given cell.
    fn apply_tool(&mut self, row: usize, col: usize) {
        match self.tool {
            ClickTool::Toggle => self.universe.toggle_cell(row, col),
            ClickTool::Stamp(pattern) => self.universe.insert(pattern, row, col),
        }
    }

    /// Builds the top panel UI (run controls, stepping, seeding).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step(1);
                }

                ui.add(
                    egui::Slider::new(&mut self.ticks_per_frame, 1..=100).text("ticks / frame"),
                );

                ui.separator();

                if ui.button("Randomize").clicked() {
                    self.randomize();
                }

                if ui.button("Clear").clicked() {
                    self.clear();
                }
            });
        });
    }

    /// Builds the bottom status bar (generation, population, dimensions).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "{} × {}",
                    self.universe.width(),
                    self.universe.height()
                ));
                ui.separator();
                ui.label(format!("population = {}", self.universe.population()));
                ui.label(format!("generation = {}", self.generation));
            });
        });
    }

    /// Builds the small floating toolbar for choosing the click tool.
    fn ui_toolbar(&mut self, ctx: &egui::Context) {
        egui::Area::new("toolbar".into())
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 50.0))
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 32))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            if ui
                                .selectable_label(
                                    matches!(self.tool, ClickTool::Toggle),
                                    "✏ Toggle",
                                )
                                .clicked()
                            {
                                self.tool = ClickTool::Toggle;
                            }

                            for &pattern in patterns::PATTERNS {
                                let selected = matches!(
                                    self.tool,
                                    ClickTool::Stamp(p) if std::ptr::eq(p, pattern)
                                );
                                if ui.selectable_label(selected, pattern.name).clicked() {
                                    self.tool = ClickTool::Stamp(pattern);
                                }
                            }
                        });
                    });
            });
    }

    /// Builds the central panel where the grid is drawn and clicked.
    fn ui_grid_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
            let origin = response.rect.min;
            let painter = ui.painter_at(response.rect);

            // Edit the grid before drawing it, so a click is visible in
            // the same frame.
            if response.clicked()
                && let Some(pos) = response.hover_pos()
                && let Some((row, col)) = self.cell_at(pos, origin)
            {
                self.apply_tool(row, col);
            }

            let width = self.universe.width();
            let height = self.universe.height();
            let pitch = self.grid_pitch();

            // Grid background; the 1px gaps between cells show it as lines.
            let grid_rect = egui::Rect::from_min_size(
                origin,
                egui::vec2(
                    GRID_LINE + width as f32 * pitch,
                    GRID_LINE + height as f32 * pitch,
                ),
            );
            painter.rect_filled(grid_rect, egui::CornerRadius::ZERO, GRID_COLOR);

            // Paint cells straight from the packed buffer: bit k of byte i
            // is cell 8i + k, row-major.
            let bytes = self.universe.cells();
            for row in 0..height {
                for col in 0..width {
                    let idx = row * width + col;
                    let alive = bytes[idx / 8] & (1 << (idx % 8)) != 0;

                    let min = egui::pos2(
                        origin.x + GRID_LINE + col as f32 * pitch,
                        origin.y + GRID_LINE + row as f32 * pitch,
                    );
                    let cell_rect =
                        egui::Rect::from_min_size(min, egui::vec2(CELL_SIZE, CELL_SIZE));
                    painter.rect_filled(
                        cell_rect,
                        egui::CornerRadius::ZERO,
                        if alive { ALIVE_COLOR } else { DEAD_COLOR },
                    );
                }
            }

            // Auto-run simulation if requested.
            if self.running {
                self.step(self.ticks_per_frame);
                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_grid_panel(ctx);
        self.ui_toolbar(ctx);
    }
}
