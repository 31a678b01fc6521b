//! PetFeeder firmware — main entry point.
//!
//! Boots ESP-IDF, brings up WiFi, and registers the three-route HTTP
//! dispatch table. Each route maps 1:1 to a [`FeederCommand`] and calls
//! the core synchronously; a request blocks for the actuator's full
//! physical duration and a core failure becomes a 500 response. No
//! routing logic lives here beyond the table itself.

use std::sync::Arc;

use anyhow::Result;
use esp_idf_hal::io::Write;
use esp_idf_hal::modem::Modem;
use esp_idf_hal::peripheral::{Peripheral, PeripheralRef};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::http::server::EspHttpServer;
use esp_idf_svc::http::Method;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{self, BlockingWifi, EspWifi};
use log::info;

use petfeeder::adapters::log_sink::LogEventSink;
use petfeeder::app::commands::FeederCommand;
use petfeeder::app::service::FeederService;
use petfeeder::config::FeederConfig;
use petfeeder::gpio::PinController;

const SSID: &str = "feeder network";
const PASSWORD: &str = "feeder password";

// HTTP handlers parse and emit JSON; default stack is too small.
const STACK_SIZE: usize = 10240;

fn create_server(modem: PeripheralRef<'_, Modem>) -> Result<EspHttpServer<'static>> {
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sys_loop.clone(), Some(nvs))?, sys_loop)?;

    let wifi_configuration = wifi::Configuration::Client(wifi::ClientConfiguration {
        ssid: SSID.try_into().unwrap(),
        auth_method: wifi::AuthMethod::WPA2Personal,
        password: PASSWORD.try_into().unwrap(),
        ..Default::default()
    });

    wifi.set_configuration(&wifi_configuration)?;
    wifi.start()?;
    wifi.connect()?;
    wifi.wait_netif_up()?;
    info!(
        "WiFi up: {:?}",
        wifi.wifi().sta_netif().get_ip_info()?
    );

    // Keep WiFi running for the life of the process.
    core::mem::forget(wifi);

    let server_configuration = esp_idf_svc::http::server::Configuration {
        stack_size: STACK_SIZE,
        ..Default::default()
    };
    Ok(EspHttpServer::new(&server_configuration)?)
}

fn register_route(
    server: &mut EspHttpServer<'static>,
    route: &str,
    cmd: FeederCommand,
    ok_body: &'static str,
    service: &Arc<FeederService>,
) -> Result<()> {
    let service = Arc::clone(service);
    server.fn_handler::<anyhow::Error, _>(route, Method::Post, move |req| {
        let mut sink = LogEventSink;
        match service.handle_command(cmd, &mut sink) {
            Ok(()) => {
                let body = serde_json::json!({ "response": ok_body });
                req.into_ok_response()?
                    .write_all(body.to_string().as_bytes())?;
            }
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() });
                req.into_status_response(500)?
                    .write_all(body.to_string().as_bytes())?;
            }
        }
        Ok(())
    })?;
    Ok(())
}

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("PetFeeder v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let mut server = create_server(peripherals.modem.into_ref())?;

    let service = Arc::new(FeederService::new(
        PinController::new(),
        FeederConfig::default(),
    )?);

    register_route(
        &mut server,
        "/treat",
        FeederCommand::DispenseTreat,
        "treat dispensed",
        &service,
    )?;
    register_route(
        &mut server,
        "/open-door",
        FeederCommand::OpenDoor,
        "door opened",
        &service,
    )?;
    register_route(
        &mut server,
        "/close-door",
        FeederCommand::CloseDoor,
        "door closed",
        &service,
    )?;

    info!("dispatch table registered: /treat /open-door /close-door");

    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}
