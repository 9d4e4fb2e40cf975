//! Terminal dashboard state and key handling

use chrono::FixedOffset;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::dashboard::{Dashboard, Outcome, Region};
use crate::map::{Feature, Viewport};

/// Fraction of the visible span moved per arrow key
const PAN_STEP: f64 = 0.1;
const ZOOM_STEP: f64 = 0.5;
const ROTATE_STEP: f64 = 15.0;
const PITCH_STEP: f64 = 10.0;
const PAGE_ROWS: isize = 10;

pub struct App {
    pub dashboard: Dashboard,
    /// Selected row of the country list
    pub countries: ListState,
    /// Map feature picked with Tab, by feature id
    pub selected_feature: Option<usize>,
    pub running: bool,
    /// Width/height of the map in degrees, tracked from the last frame
    pub map_aspect: f64,
    /// Offset the "Updated At" timestamp is shown in
    pub offset: FixedOffset,
}

impl App {
    pub fn new(dashboard: Dashboard, offset: FixedOffset) -> Self {
        Self {
            dashboard,
            countries: ListState::default(),
            selected_feature: None,
            running: true,
            map_aspect: 2.0,
            offset,
        }
    }

    /// Track the drawn map size; terminal cells are about twice as tall as wide
    pub fn set_map_area(&mut self, area: Rect) {
        if area.width > 0 && area.height > 0 {
            self.map_aspect = area.width as f64 / (area.height as f64 * 2.0);
        }
    }

    /// Map features in view, west to east
    pub fn visible_features(&self) -> Vec<Feature> {
        let mut features = self.dashboard.visible_features(self.map_aspect);
        features.sort_by(|a, b| a.longitude.total_cmp(&b.longitude));
        features
    }

    /// React to a fetch being applied
    pub fn on_outcome(&mut self, outcome: Outcome) {
        let Outcome::Applied(regions) = outcome else {
            return;
        };

        if regions.contains(&Region::CountryList) {
            let len = self.dashboard.state().countries.len();
            match self.countries.selected() {
                _ if len == 0 => self.countries.select(None),
                Some(i) if i >= len => self.countries.select(Some(len - 1)),
                None => self.countries.select(Some(0)),
                Some(_) => {}
            }
        }

        // Feature ids are only stable within one cluster index
        if regions.contains(&Region::Map) {
            self.selected_feature = None;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let viewport = self.dashboard.state().viewport;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }

            KeyCode::Left => self.move_camera(viewport.panned(-PAN_STEP, 0.0)),
            KeyCode::Right => self.move_camera(viewport.panned(PAN_STEP, 0.0)),
            KeyCode::Up => self.move_camera(viewport.panned(0.0, PAN_STEP)),
            KeyCode::Down => self.move_camera(viewport.panned(0.0, -PAN_STEP)),
            KeyCode::Char('+') | KeyCode::Char('=') => self.move_camera(viewport.zoomed(ZOOM_STEP)),
            KeyCode::Char('-') => self.move_camera(viewport.zoomed(-ZOOM_STEP)),
            KeyCode::Char('[') => self.move_camera(viewport.rotated(-ROTATE_STEP)),
            KeyCode::Char(']') => self.move_camera(viewport.rotated(ROTATE_STEP)),
            KeyCode::Char('<') => self.move_camera(viewport.tilted(-PITCH_STEP)),
            KeyCode::Char('>') => self.move_camera(viewport.tilted(PITCH_STEP)),
            KeyCode::Char('0') => self.move_camera(self.dashboard.options().viewport),

            KeyCode::Tab => self.cycle_feature(true),
            KeyCode::BackTab => self.cycle_feature(false),
            KeyCode::Enter => self.expand_selected(),

            KeyCode::Char('j') => self.scroll(1),
            KeyCode::Char('k') => self.scroll(-1),
            KeyCode::PageDown => self.scroll(PAGE_ROWS),
            KeyCode::PageUp => self.scroll(-PAGE_ROWS),
            KeyCode::Home => self.scroll(isize::MIN),
            KeyCode::End => self.scroll(isize::MAX),

            _ => {}
        }
    }

    fn move_camera(&mut self, viewport: Viewport) {
        self.dashboard.on_viewport_change(viewport);
    }

    fn cycle_feature(&mut self, forward: bool) {
        let features = self.visible_features();
        let len = features.len();
        if len == 0 {
            self.selected_feature = None;
            return;
        }

        let current = self
            .selected_feature
            .and_then(|id| features.iter().position(|f| f.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.selected_feature = Some(features[next].id);
    }

    fn expand_selected(&mut self) {
        let Some(id) = self.selected_feature else {
            return;
        };

        match self.dashboard.on_cluster_click(id) {
            Ok(_) => self.selected_feature = None,
            Err(e) => tracing::debug!(error = %e, "Selected feature cannot be expanded"),
        }
    }

    fn scroll(&mut self, delta: isize) {
        let len = self.dashboard.state().countries.len();
        if len == 0 {
            self.countries.select(None);
            return;
        }

        let next = match self.countries.selected() {
            None => 0,
            Some(i) => (i as isize).saturating_add(delta).clamp(0, len as isize - 1) as usize,
        };
        self.countries.select(Some(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardOptions;
    use crate::test_support::FakeSource;
    use std::sync::Arc;

    async fn loaded_app() -> App {
        let dashboard = Dashboard::mount(Arc::new(FakeSource::loaded()), DashboardOptions::default());
        let mut app = App::new(dashboard, utc());
        while let Some(outcome) = app.dashboard.next_update().await {
            app.on_outcome(outcome);
        }
        app
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = loaded_app().await;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = loaded_app().await;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_camera_keys_replace_viewport() {
        let mut app = loaded_app().await;
        let start = app.dashboard.state().viewport;

        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.dashboard.state().viewport.zoom, start.zoom + ZOOM_STEP);

        press(&mut app, KeyCode::Right);
        assert!(app.dashboard.state().viewport.longitude > start.longitude);

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.dashboard.state().viewport.bearing, ROTATE_STEP);

        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.dashboard.state().viewport.pitch, PITCH_STEP);

        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.dashboard.state().viewport, start);
    }

    #[tokio::test]
    async fn test_tab_then_enter_expands_cluster() {
        let mut app = loaded_app().await;

        // West to east: the European cluster comes before India
        press(&mut app, KeyCode::Tab);
        let selected = app.selected_feature.unwrap();
        let feature = app.dashboard.clusters().feature(selected).unwrap();
        assert!(feature.is_cluster());

        press(&mut app, KeyCode::Enter);
        let viewport = app.dashboard.state().viewport;
        assert_eq!(viewport.zoom, 3.0);
        assert_eq!(viewport.transition_ms, Some(500));
        assert!(app.selected_feature.is_none());
    }

    #[tokio::test]
    async fn test_enter_on_country_keeps_camera() {
        let mut app = loaded_app().await;
        let start = app.dashboard.state().viewport;

        press(&mut app, KeyCode::BackTab);
        let selected = app.selected_feature.unwrap();
        assert_eq!(app.dashboard.clusters().feature(selected).unwrap().label, "India");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.dashboard.state().viewport, start);
        assert_eq!(app.selected_feature, Some(selected));
    }

    #[tokio::test]
    async fn test_list_scrolling_is_clamped() {
        let mut app = loaded_app().await;
        assert_eq!(app.countries.selected(), Some(0));

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.countries.selected(), Some(0));

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.countries.selected(), Some(1));

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.countries.selected(), Some(3));

        press(&mut app, KeyCode::Home);
        assert_eq!(app.countries.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_map_aspect_tracks_area() {
        let mut app = loaded_app().await;

        app.set_map_area(Rect::new(0, 0, 120, 20));
        assert_eq!(app.map_aspect, 3.0);

        app.set_map_area(Rect::new(0, 0, 0, 0));
        assert_eq!(app.map_aspect, 3.0);
    }
}
