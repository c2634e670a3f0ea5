use crate::config::MapConfig;
use crate::engine::EguiMapEngine;
use crate::event::{DrawnFeature, LogEventHandler};
use crate::geometry::Coordinate;
use crate::host::MapViewHost;
use crate::mode::DrawMode;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
///
/// Only the config is persisted; drawn geometries live as long as the view.
#[derive(serde::Deserialize, serde::Serialize, Debug)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct MapDrawApp {
    config: MapConfig,
    #[serde(skip)]
    host: Option<MapViewHost<EguiMapEngine>>,
    // Shown in place of the map when the surface could not be mounted
    #[serde(skip)]
    init_error: Option<String>,
    #[serde(skip)]
    last_drawn: Option<DrawnFeature>,
}

impl Default for MapDrawApp {
    fn default() -> Self {
        Self {
            config: MapConfig::default(),
            host: None,
            init_error: None,
            last_drawn: None,
        }
    }
}

impl MapDrawApp {
    /// Called once before the first frame.
    ///
    /// An explicit `config` wins over the one persisted from the last run.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<MapConfig>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = config
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value::<MapDrawApp>(storage, eframe::APP_KEY))
                    .map(|app| app.config)
            })
            .unwrap_or_default();

        Self::with_config(config)
    }

    /// Builds the map view and mounts it
    pub fn with_config(config: MapConfig) -> Self {
        let mut host = MapViewHost::new(EguiMapEngine::new(&config), config.clone());
        host.event_bus().subscribe(Box::new(LogEventHandler));

        let (host, init_error) = match host.init() {
            Ok(()) => (Some(host), None),
            Err(e) => {
                log::error!("map view failed to initialize: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Self {
            config,
            host,
            init_error,
            last_drawn: None,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.host.as_ref().map(|h| h.mode()).unwrap_or_default()
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        if let Some(host) = &mut self.host {
            if let Err(e) = host.set_mode(mode) {
                log::warn!("cannot change draw mode: {}", e);
            }
        }
    }

    pub fn feature_count(&self) -> usize {
        self.host.as_ref().map_or(0, |h| h.store().len())
    }

    pub fn marker_position(&self) -> Option<Coordinate> {
        self.host.as_ref().and_then(|h| h.marker_position())
    }

    pub fn last_drawn(&self) -> Option<&DrawnFeature> {
        self.last_drawn.as_ref()
    }

    /// Render the map viewport, or the fallback when it failed to mount
    pub fn show_map(&mut self, ui: &mut egui::Ui) {
        match &mut self.host {
            Some(host) => {
                if let Some(drawn) = host.show(ui).pop() {
                    self.last_drawn = Some(drawn);
                }
            }
            None => {
                let size = egui::vec2(ui.available_width(), self.config.viewport_height);
                ui.allocate_ui(size, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(format!(
                            "Map unavailable: {}",
                            self.init_error.as_deref().unwrap_or("not initialized")
                        ));
                    });
                });
            }
        }
    }
}

impl eframe::App for MapDrawApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        crate::panels::map_panel(self, ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(host) = &mut self.host {
            host.dispose();
        }
    }
}
