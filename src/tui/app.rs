//! Application state management

use crate::config::Config;
use crate::monitor::Monitor;
use crate::sensors::SensorKind;

/// One line of the scrollable sensor view
pub enum DisplayRow {
    /// Component heading
    Component(String),
    /// Sensor reading line
    Sensor {
        name: String,
        kind: SensorKind,
        value: Option<f32>,
    },
    /// Spacer between components
    Blank,
}

/// Application state
pub struct App {
    /// Rows of the sensor view, rebuilt on every poll tick
    pub rows: Vec<DisplayRow>,
    /// Current scroll offset into the rows
    pub scroll: u16,
    /// Height of the sensor viewport, recorded by the last draw
    pub viewport_height: u16,
    /// Whether a recording session is active
    pub recording: bool,
    /// File currently being recorded to, for the header line
    pub recording_file: Option<String>,
    /// Transient status line content
    pub status_message: Option<String>,
    /// Text shown for a sensor that currently reports no value
    pub missing_placeholder: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            rows: Vec::new(),
            scroll: 0,
            viewport_height: 0,
            recording: false,
            recording_file: None,
            status_message: None,
            missing_placeholder: config.general.missing_placeholder.clone(),
        }
    }

    /// Run one poll tick and rebuild the view from the fresh readings
    pub fn update(&mut self, monitor: &mut Monitor) {
        let outcome = monitor.tick();
        if outcome.flushed {
            self.set_status_message("Buffer flushed (memory pressure)".to_string());
        }
        self.refresh_recording_state(monitor);
        self.rebuild_rows(monitor);
    }

    /// Start or stop recording and report the transition in the status line
    pub fn toggle_recording(&mut self, monitor: &mut Monitor) {
        monitor.toggle_recording();
        self.refresh_recording_state(monitor);

        if self.recording {
            let target = self
                .recording_file
                .clone()
                .unwrap_or_else(|| "<no file>".to_string());
            self.set_status_message(format!("Recording to {}", target));
        } else {
            self.set_status_message("Recording stopped".to_string());
        }
    }

    /// Manually drain the sample buffer to the output file
    pub fn flush(&mut self, monitor: &mut Monitor) {
        monitor.flush();
        self.refresh_recording_state(monitor);
        self.set_status_message("Buffer flushed".to_string());
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.viewport_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll = (self.scroll + self.viewport_height.max(1)).min(self.max_scroll());
    }

    pub fn scroll_home(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_end(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        (self.rows.len() as u16).saturating_sub(self.viewport_height)
    }

    fn refresh_recording_state(&mut self, monitor: &Monitor) {
        self.recording = monitor.is_recording();
        self.recording_file = monitor
            .current_file()
            .map(|p| p.display().to_string());
    }

    fn rebuild_rows(&mut self, monitor: &Monitor) {
        let topology = monitor.topology();
        let snapshot = monitor.snapshot();

        let mut rows = Vec::new();
        for (i, component) in snapshot.components.iter().enumerate() {
            rows.push(DisplayRow::Component(component.name.clone()));
            for sensor in &component.sensors {
                rows.push(DisplayRow::Sensor {
                    name: sensor.name.clone(),
                    kind: sensor.kind,
                    value: sensor.value,
                });
            }
            if i + 1 < topology.component_count() {
                rows.push(DisplayRow::Blank);
            }
        }

        self.rows = rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }
}
