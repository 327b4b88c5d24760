use std::time::Duration;

use tokio::sync::mpsc;

use tictactoe_common::games::GameEvent;
use tictactoe_common::games::tictactoe::{
    BOARD_SIZE, CELL_COUNT, Difficulty, Mark, Symbol, TicTacToeSessionSettings,
};

use crate::state::{BoardView, ClientCommand};

const CELL_SIZE: f32 = 110.0;
const LINE_WIDTH: f32 = 2.0;
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct TicTacToeApp {
    view: BoardView,
    events: mpsc::UnboundedReceiver<GameEvent>,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
}

impl TicTacToeApp {
    pub fn new(
        settings: TicTacToeSessionSettings,
        events: mpsc::UnboundedReceiver<GameEvent>,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
    ) -> Self {
        Self {
            view: BoardView::new(&settings),
            events,
            command_tx,
        }
    }

    fn send(&self, command: ClientCommand) {
        let _ = self.command_tx.send(command);
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.view.apply(event);
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut selected = self.view.difficulty;
            egui::ComboBox::from_label("Difficulty")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for difficulty in Difficulty::ALL {
                        ui.selectable_value(&mut selected, difficulty, difficulty.label());
                    }
                });
            if selected != self.view.difficulty {
                self.view.difficulty = selected;
                self.send(ClientCommand::SetDifficulty(selected));
            }

            ui.add_space(10.0);

            for symbol in [Symbol::X, Symbol::O] {
                let label = format!("Play {}", symbol);
                let text = if self.view.user_symbol == symbol {
                    egui::RichText::new(label).strong()
                } else {
                    egui::RichText::new(label)
                };
                if ui.button(text).clicked() {
                    self.view.user_symbol = symbol;
                    self.send(ClientCommand::ChooseSymbol(symbol));
                }
            }

            if ui.button("Restart (R)").clicked() {
                self.send(ClientCommand::Restart);
            }
        });
    }

    fn render_board(&self, ui: &mut egui::Ui) {
        let board_size = CELL_SIZE * BOARD_SIZE as f32;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        for index in 0..CELL_COUNT {
            if self.view.is_highlighted(index) {
                painter.rect_filled(
                    Self::cell_rect(rect, index),
                    0.0,
                    egui::Color32::from_rgb(170, 230, 170),
                );
            }
        }

        let hovered = response
            .hover_pos()
            .and_then(|pos| Self::cell_at(rect, pos))
            .filter(|&index| self.view.cells[index].is_empty());
        if let Some(index) = hovered {
            painter.rect_filled(
                Self::cell_rect(rect, index),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
        }

        for i in 0..=BOARD_SIZE {
            let offset = i as f32 * CELL_SIZE;
            let stroke = egui::Stroke::new(LINE_WIDTH, egui::Color32::BLACK);
            painter.line_segment(
                [
                    egui::pos2(rect.left() + offset, rect.top()),
                    egui::pos2(rect.left() + offset, rect.bottom()),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.top() + offset),
                    egui::pos2(rect.right(), rect.top() + offset),
                ],
                stroke,
            );
        }

        for (index, mark) in self.view.cells.iter().enumerate() {
            let cell_rect = Self::cell_rect(rect, index);
            match mark {
                Mark::X => Self::draw_x(painter, cell_rect),
                Mark::O => Self::draw_o(painter, cell_rect),
                Mark::Empty => {}
            }
        }

        if response.clicked()
            && let Some(index) = hovered
        {
            self.send(ClientCommand::PlaceMark { index });
        }
    }

    fn handle_keys(&self, ctx: &egui::Context) {
        let pressed = |key| ctx.input(|i| i.key_pressed(key));

        if pressed(egui::Key::R) {
            self.send(ClientCommand::Restart);
        }

        let digit_keys = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
            egui::Key::Num5,
            egui::Key::Num6,
            egui::Key::Num7,
            egui::Key::Num8,
            egui::Key::Num9,
        ];
        for (index, key) in digit_keys.into_iter().enumerate() {
            if pressed(key) {
                self.send(ClientCommand::PlaceMark { index });
            }
        }
    }

    fn cell_rect(board: egui::Rect, index: usize) -> egui::Rect {
        let row = index / BOARD_SIZE;
        let col = index % BOARD_SIZE;
        egui::Rect::from_min_size(
            egui::pos2(
                board.left() + col as f32 * CELL_SIZE,
                board.top() + row as f32 * CELL_SIZE,
            ),
            egui::vec2(CELL_SIZE, CELL_SIZE),
        )
    }

    fn cell_at(board: egui::Rect, pos: egui::Pos2) -> Option<usize> {
        if !board.contains(pos) {
            return None;
        }
        let col = (((pos.x - board.left()) / CELL_SIZE) as usize).min(BOARD_SIZE - 1);
        let row = (((pos.y - board.top()) / CELL_SIZE) as usize).min(BOARD_SIZE - 1);
        Some(row * BOARD_SIZE + col)
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let radius = rect.width() / 2.0 - padding;
        let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(50, 50, 220));

        painter.circle_stroke(rect.center(), radius, stroke);
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_controls(ui);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.heading(self.view.status.as_str());
                ui.add_space(10.0);
                self.render_board(ui);
            });
        });

        // Session events arrive from the game task without waking egui.
        ctx.request_repaint_after(EVENT_POLL_INTERVAL);
    }
}

impl Drop for TicTacToeApp {
    fn drop(&mut self) {
        self.send(ClientCommand::Quit);
    }
}
