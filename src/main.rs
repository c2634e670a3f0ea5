#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional path to a JSON map config as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => match map_draw::MapConfig::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::error!("ignoring config '{}': {}", path, e);
                None
            }
        },
        None => None,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 620.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Map Draw",
        native_options,
        Box::new(|cc| Ok(Box::new(map_draw::MapDrawApp::new(cc, config)))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        // The mount target is fixed by the page, not by persisted settings
        let mount_target = map_draw::MapConfig::default().mount_target;
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document to mount the map on");
            return;
        };

        let canvas = document
            .get_element_by_id(&mount_target)
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            let error = map_draw::MapError::InitializationFailure {
                target: mount_target,
                reason: "no canvas element with that id".to_string(),
            };
            log::error!("{}", error);
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                // Passing no config lets the app restore the one saved in local storage
                Box::new(|cc| Ok(Box::new(map_draw::MapDrawApp::new(cc, None)))),
            )
            .await;

        if let Err(e) = start_result {
            log::error!("failed to start eframe: {:?}", e);
        }
    });
}
