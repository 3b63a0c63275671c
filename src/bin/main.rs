#![no_main]
#![no_std]

use debug_display as _; // global logger + panicking-behavior + memory layout
use rtic::app;
use rtic_monotonics::systick::Systick;
use rtic_monotonics::Monotonic;

defmt::timestamp!(
    "{=u32:ms}",
    Systick::now().duration_since_epoch().to_millis()
);

#[app(
    device = stm32f4xx_hal::pac,
    peripherals = true,
    dispatchers = [TIM3]
)]
mod app {
    use debug_display::clock::ClockSource;
    use debug_display::config;
    use debug_display::gui::DebugScreen;
    use debug_display::hardware::{self, display::Lcd, Hardware, LedPin};
    use debug_display::led::StatusLed;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;
    use rtic_monotonics::systick::*;
    use rtic_monotonics::Monotonic;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        led: StatusLed<LedPin>,
        clock_source: ClockSource,
        lcd: Lcd,
        screen: DebugScreen,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        defmt::info!("init");

        let Hardware {
            led,
            mut lcd,
            clock_source,
        } = hardware::setup(cx.device);

        let systick_mono_token = rtic_monotonics::create_systick_token!();
        Systick::start(cx.core.SYST, config::SYSCLK_HZ, systick_mono_token);

        let screen = DebugScreen::new(clock_source);
        let drawn = lcd
            .clear(Rgb565::BLACK)
            .and_then(|()| screen.draw_banner(&mut lcd));
        if let Err(e) = drawn {
            defmt::error!("banner: {}", e);
            hardware::halt(led);
        }
        defmt::info!("running from {}", clock_source);

        heartbeat::spawn().ok();
        status::spawn().ok();

        (
            Shared {},
            Local {
                led,
                clock_source,
                lcd,
                screen,
            },
        )
    }

    #[task(local = [led, clock_source])]
    async fn heartbeat(cx: heartbeat::Context) {
        let pattern = cx.local.clock_source.heartbeat();
        loop {
            for &(on, ms) in pattern {
                cx.local.led.set(on);
                Systick::delay(ms.millis()).await;
            }
        }
    }

    #[task(local = [lcd, screen])]
    async fn status(cx: status::Context) {
        let (screen, lcd) = (cx.local.screen, cx.local.lcd);
        let mut counter: u16 = 0;
        loop {
            let uptime_ms = Systick::now().duration_since_epoch().to_millis();
            if let Err(e) = screen.draw_status(lcd, counter, uptime_ms) {
                defmt::warn!("status redraw failed: {}", e);
            }
            counter = counter.wrapping_add(1);
            Systick::delay(config::STATUS_PERIOD_MS.millis()).await;
        }
    }
}
