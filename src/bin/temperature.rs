//! STM32F103 Blue Pill Temperature Readout on a Mirrored LED Matrix
//! =============================================================================================
//!
//! This firmware shows the chip temperature as a "dd.d" readout on an 8x12 LED
//! matrix, mirrored on an SSD1306 OLED:
//! - Internal temperature sensor and VREFINT sampled by ADC1
//! - 8x12 matrix frame rendered with the 3x5 digit font
//! - Each LED drawn as an 8x8 block (96x64) on a 128x64 SSD1306 via I2C1
//! - Value text in the 32 px strip to the right of the matrix
//!
//! Hardware Connections:
//!   OLED Display -> Blue Pill
//!      GND  -> GND
//!      VCC  -> 5V
//!      SDA  -> PB7
//!      SCL  -> PB6
//!
//! Run with `cargo run --release --features firmware --target thumbv7m-none-eabi --bin temperature`.

#![no_std]
#![no_main]

use defmt_rtt as _; // Global logger
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_stm32::{
    adc::{self, Adc, SampleTime},
    bind_interrupts,
    gpio::{Level, Output, Speed},
    i2c::{self, ErrorInterruptHandler, EventInterruptHandler},
    peripherals,
    time::Hertz,
};
use embassy_sync::{
    blocking_mutex::raw::ThreadModeRawMutex,
    channel::{Channel, Receiver, Sender},
};
use embassy_time::{Duration, Ticker};
use embedded_graphics::{
    mono_font::{MonoTextStyleBuilder, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use panic_probe as _; // Panic handler
use ssd1306::{I2CDisplayInterface, Ssd1306, prelude::*};

use matrix_readout::hardware::{matrix_display::MatrixDisplay, scaled_matrix::ScaledMatrix};
use matrix_readout::sensor::internal_temperature_celsius;

/// OLED pixels per matrix LED
const LED_SCALE: u32 = 8;

/// Sensor sampling period
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Display refresh period when no new reading arrives
const REFRESH_INTERVAL: Duration = Duration::from_millis(500);

// Channel carrying the latest temperature in °C
static TEMPERATURE_CHANNEL: Channel<ThreadModeRawMutex, f32, 1> = Channel::new();

bind_interrupts!(struct Irqs {
    ADC1_2 => adc::InterruptHandler<peripherals::ADC1>;
    I2C1_EV => EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => ErrorInterruptHandler<peripherals::I2C1>;
});

/// Main application entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // 72 MHz from the 8 MHz crystal, ADC clock 12 MHz
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV1,
            mul: PllMul::MUL9,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
        config.rcc.adc_pre = ADCPrescaler::DIV6;
    }
    let p = embassy_stm32::init(config);

    defmt::info!("temperature readout starting");

    // ADC1 for the internal channels
    let adc = Adc::new(p.ADC1);

    _spawner
        .spawn(sensor_update(adc, TEMPERATURE_CHANNEL.sender(), SAMPLE_INTERVAL))
        .unwrap();

    // I2C1 at 400kHz for the OLED
    let i2c = i2c::I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH7,
        Hertz::khz(400),
        Default::default(),
    );

    _spawner
        .spawn(matrix_display(
            i2c,
            TEMPERATURE_CHANNEL.receiver(),
            REFRESH_INTERVAL,
        ))
        .unwrap();

    // Onboard LED (PC13) heartbeat
    let mut led = Output::new(p.PC13, Level::High, Speed::Low);
    let mut ticker = Ticker::every(Duration::from_millis(500));

    loop {
        led.set_low(); // LED on
        ticker.next().await;
        led.set_high(); // LED off
        ticker.next().await;
    }
}

/// Temperature Sampling Task
///
/// Responsibilities:
/// 1. Enable the VREFINT and temperature sensor channels
/// 2. Sample both channels every `delay`
/// 3. Publish the latest temperature, dropping any unread one
#[embassy_executor::task]
async fn sensor_update(
    mut adc: Adc<'static, peripherals::ADC1>,
    sender: Sender<'static, ThreadModeRawMutex, f32, 1>,
    delay: Duration,
) {
    // The sensor needs at least 17.1 us of sampling time
    adc.set_sample_time(SampleTime::CYCLES239_5);
    let mut vref = adc.enable_vref();
    let mut temperature = adc.enable_temperature();

    let mut ticker = Ticker::every(delay);

    loop {
        let vref_raw = adc.read(&mut vref).await;
        let temp_raw = adc.read(&mut temperature).await;
        let celsius = internal_temperature_celsius(temp_raw, vref_raw);

        defmt::debug!("vref={} temp={} -> {} C", vref_raw, temp_raw, celsius);

        sender.clear();
        sender.send(celsius).await;

        ticker.next().await;
    }
}

/// LED Matrix Rendering Task
///
/// Responsibilities:
/// 1. Bring up the SSD1306 and the mirrored matrix
/// 2. Render the latest temperature as a matrix frame
/// 3. Print the value text beside the matrix
/// 4. Redraw on every new reading or refresh tick
#[embassy_executor::task]
async fn matrix_display(
    i2c: i2c::I2c<'static, embassy_stm32::mode::Async>,
    receiver: Receiver<'static, ThreadModeRawMutex, f32, 1>,
    delay: Duration,
) {
    let interface = I2CDisplayInterface::new(i2c);
    let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    oled.init().unwrap();

    let mut display = MatrixDisplay::new(ScaledMatrix::new(oled, Point::zero(), LED_SCALE));
    display.begin().unwrap();

    let text_style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .background_color(BinaryColor::Off)
        .build();

    // Strip to the right of the 96 px matrix
    let label_area = Rectangle::new(Point::new(96, 0), Size::new(32, 64));

    let mut ticker = Ticker::every(delay);
    let mut celsius = receiver.receive().await;

    loop {
        let readout = display.show_float(celsius as f64).unwrap();

        let oled = display.driver_mut().target_mut();
        oled.fill_solid(&label_area, BinaryColor::Off).unwrap();
        Text::with_baseline(&readout.text(), Point::new(100, 20), text_style, Baseline::Top)
            .draw(oled)
            .unwrap();
        Text::with_baseline("C", Point::new(109, 34), text_style, Baseline::Top)
            .draw(oled)
            .unwrap();
        oled.flush().unwrap();

        if let Either::First(new_celsius) = select(receiver.receive(), ticker.next()).await {
            celsius = new_celsius;
        }
    }
}
