use std::time::Duration;

use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use log::debug;
use pathfind::{
    find::{MapStorage, MapTrait, PathFinder, PathFinderState, Visited},
    grid::{Cell, CellStorage, Grid, Point},
    util::random_grid,
};

const GRID_ROWS: usize = 20;
const GRID_COLS: usize = 20;

/// Search expansions per animation frame
const STEPS_PER_FRAME: usize = 5;

pub struct App {
    state: State,
    pathfinder: Option<PathFinder<Point, CellStorage<Visited<Point>>, Grid>>,
    /// Cell state applied by the active paint stroke, while the mouse is down
    paint: Option<Cell>,
    output: String,
}

/// We derive Deserialize/Serialize so we can persist the view settings on
/// shutdown. The map itself is not persisted, a session starts from a clean
/// grid.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct State {
    #[serde(skip)]
    map: Grid,
    start: Point,
    goal: Point,
    wall_density: f64,
    draw_grid_lines: bool,
    draw_visited: bool,
    animate_search: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            map: Grid::new(GRID_ROWS, GRID_COLS),
            start: Point { row: 0, col: 0 },
            goal: Point {
                row: GRID_ROWS - 1,
                col: GRID_COLS - 1,
            },
            wall_density: 0.3,
            draw_grid_lines: true,
            draw_visited: false,
            animate_search: true,
        }
    }
}

impl App {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load the previous view settings (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let state: State = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };

        App {
            state,
            pathfinder: None,
            paint: None,
            output: Default::default(),
        }
    }

    fn clear_search(&mut self) {
        self.pathfinder = None;
        self.output.clear();
    }

    fn randomize(&mut self) {
        let mut rng = rand::thread_rng();
        self.state.map = random_grid(GRID_ROWS, GRID_COLS, self.state.wall_density, &mut rng);

        // the endpoints always stay open
        self.state.map.set(self.state.start, Cell::Open);
        self.state.map.set(self.state.goal, Cell::Open);

        self.clear_search();
    }

    fn start_search(&mut self) {
        debug!(
            "searching {:?} -> {:?}",
            self.state.start, self.state.goal
        );

        let mut pathfinder = PathFinder::new(
            self.state.start,
            self.state.goal,
            self.state.map.create_storage(),
        );

        if !self.state.animate_search {
            loop {
                match pathfinder.step(&self.state.map) {
                    PathFinderState::Computing => {}
                    _s => break,
                }
            }
        }

        self.pathfinder = Some(pathfinder);
        self.output.clear();
    }
}

impl eframe::App for App {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.add_space(16.0);

                egui::widgets::global_dark_light_mode_buttons(ui);
            });
        });

        egui::SidePanel::left("side_panel").show(ctx, |ui| {
            ui.heading("Maze");

            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    self.state.map = Grid::new(GRID_ROWS, GRID_COLS);
                    self.clear_search();
                }
                if ui.button("Random").clicked() {
                    self.randomize();
                }
            });
            ui.add(
                egui::Slider::new(&mut self.state.wall_density, 0.0..=1.0).text("wall density"),
            );

            ui.separator();

            if ui.button("Solve").clicked() {
                self.start_search();
            }
            if let Some(pathfinder) = &mut self.pathfinder {
                ui.horizontal(|ui| {
                    if ui.button("Step").clicked() {
                        pathfinder.step(&self.state.map);
                    }
                    if ui.button("Finish").clicked() {
                        loop {
                            match pathfinder.step(&self.state.map) {
                                PathFinderState::Computing => {}
                                _s => break,
                            }
                        }
                    }
                });

                if self.state.animate_search {
                    for _ in 0..STEPS_PER_FRAME {
                        match pathfinder.step(&self.state.map) {
                            PathFinderState::Computing => {
                                ctx.request_repaint_after(Duration::from_millis(20));
                            }
                            _ => break,
                        }
                    }
                }
            }
            ui.checkbox(&mut self.state.animate_search, "Animate search");
            ui.checkbox(&mut self.state.draw_visited, "Show visited cells");
            ui.checkbox(&mut self.state.draw_grid_lines, "Draw grid lines");

            ui.separator();
            ui.label(&self.output);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                powered_by_egui_and_eframe(ui);
                egui::warn_if_debug_build(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.grid_view(ui);
        });
    }
}

impl App {
    fn grid_view(&mut self, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        let rows = self.state.map.rows();
        let columns = self.state.map.columns();
        let cell_size = (rect.width() / columns as f32).min(rect.height() / rows as f32);
        let origin = rect.min;

        let cell_rect = |p: Point| {
            Rect::from_min_size(
                Pos2::new(
                    origin.x + p.col as f32 * cell_size,
                    origin.y + p.row as f32 * cell_size,
                ),
                Vec2::splat(cell_size),
            )
        };
        let cell_center = |p: Point| {
            Pos2::new(
                origin.x + (p.col as f32 + 0.5) * cell_size,
                origin.y + (p.row as f32 + 0.5) * cell_size,
            )
        };

        // a press toggles the cell and starts a stroke, dragging paints the
        // stroke's state; the endpoints are never paintable
        if response.drag_started() || response.clicked() {
            if let Some(point) = response
                .interact_pointer_pos()
                .and_then(|pos| point_at(rows, columns, origin, cell_size, pos))
            {
                if point != self.state.start && point != self.state.goal {
                    self.state.map.toggle(point);
                    self.paint = Some(self.state.map.get(point));
                    self.clear_search();
                }
            }
        }
        if response.dragged() {
            if let (Some(paint), Some(point)) = (
                self.paint,
                response
                    .interact_pointer_pos()
                    .and_then(|pos| point_at(rows, columns, origin, cell_size, pos)),
            ) {
                if point != self.state.start
                    && point != self.state.goal
                    && self.state.map.get(point) != paint
                {
                    self.state.map.set(point, paint);
                    self.clear_search();
                }
            }
        }
        if response.drag_stopped() {
            self.paint = None;
        }

        let painter = ui.painter();

        // the cells of the map, with the endpoints marked
        for row in 0..rows {
            for col in 0..columns {
                let point = Point { row, col };
                let color = if point == self.state.start {
                    Color32::GREEN
                } else if point == self.state.goal {
                    Color32::RED
                } else {
                    match self.state.map.get(point) {
                        Cell::Blocked => Color32::BLACK,
                        Cell::Open => Color32::WHITE,
                    }
                };
                painter.rect_filled(cell_rect(point), Rounding::ZERO, color);
            }
        }

        if let Some(pathfinder) = &self.pathfinder {
            let visited = pathfinder.get_visited();

            if self.state.draw_visited {
                let margin = cell_size * 0.15;
                for row in 0..rows {
                    for col in 0..columns {
                        let point = Point { row, col };
                        if let Some(item) = *visited.get(point) {
                            let color = Color32::from_rgba_unmultiplied(
                                item.distance.min(255) as u8,
                                0,
                                0,
                                200,
                            );
                            painter.rect_filled(
                                cell_rect(point).shrink(margin),
                                Rounding::ZERO,
                                color,
                            );
                        }
                    }
                }
            }

            match pathfinder.state() {
                PathFinderState::Computing => {}
                PathFinderState::NoPathFound => {
                    self.output = "no path found".to_owned();
                }
                PathFinderState::PathFound(result) => {
                    self.output = format!("path found, {} steps", result.distance);

                    for point in &result.path {
                        if *point != self.state.start && *point != self.state.goal {
                            painter.rect_filled(
                                cell_rect(*point),
                                Rounding::ZERO,
                                Color32::LIGHT_BLUE,
                            );
                        }
                    }
                    for pair in result.path.windows(2) {
                        painter.line_segment(
                            [cell_center(pair[0]), cell_center(pair[1])],
                            Stroke::new(cell_size * 0.1, Color32::BLUE),
                        );
                    }
                }
            }
        }

        if self.state.draw_grid_lines {
            let stroke = Stroke::new(1.0, Color32::BLACK);
            for row in 0..=rows {
                let y = origin.y + row as f32 * cell_size;
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y),
                        Pos2::new(origin.x + columns as f32 * cell_size, y),
                    ],
                    stroke,
                );
            }
            for col in 0..=columns {
                let x = origin.x + col as f32 * cell_size;
                painter.line_segment(
                    [
                        Pos2::new(x, origin.y),
                        Pos2::new(x, origin.y + rows as f32 * cell_size),
                    ],
                    stroke,
                );
            }
        }

        // highlight the hovered cell and its open neighbors
        if let Some(point) = response
            .hover_pos()
            .and_then(|pos| point_at(rows, columns, origin, cell_size, pos))
        {
            painter.rect_stroke(
                cell_rect(point),
                Rounding::ZERO,
                Stroke::new(2.0, Color32::GREEN),
            );
            for neighbor in self.state.map.neighbors_of(point) {
                painter.line_segment(
                    [cell_center(point), cell_center(neighbor)],
                    Stroke::new(1.0, Color32::GREEN),
                );
            }
        }
    }
}

fn point_at(rows: usize, columns: usize, origin: Pos2, cell_size: f32, pos: Pos2) -> Option<Point> {
    let x = (pos.x - origin.x) / cell_size;
    let y = (pos.y - origin.y) / cell_size;

    if x < 0.0 || y < 0.0 {
        return None;
    }
    let point = Point {
        row: y as usize,
        col: x as usize,
    };
    if point.row < rows && point.col < columns {
        Some(point)
    } else {
        None
    }
}

fn powered_by_egui_and_eframe(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label("Powered by ");
        ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        ui.label(" and ");
        ui.hyperlink_to(
            "eframe",
            "https://github.com/emilk/egui/tree/master/crates/eframe",
        );
        ui.label(".");
    });
}
