//! Full example code for driving a 128x32 SSD1306 module as a fuel meter readout. This runs on an
//! STM32F303RE with the module on I2C1 (PB6 SCL, PB7 SDA) at the default address.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate ssd1306_telemetry;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::i2c::I2c;
use hal::prelude::*;
use ssd1306_telemetry as oled;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // I2C1 is Alternate Function 4 for GPIOs PB6,7.
    let mut gpiob = dp.GPIOB.split(&mut rcc.ahb);
    let scl = gpiob.pb6.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let sda = gpiob.pb7.into_af4(&mut gpiob.moder, &mut gpiob.afrl);
    let i2c = I2c::i2c1(dp.I2C1, (scl, sda), 400.khz(), clocks, &mut rcc.apb1);

    let mut disp = oled::Display::new(
        oled::I2cInterface::new(i2c, oled::interface::i2c::DEFAULT_ADDRESS),
        oled::Geometry::SIZE_128X32,
    );

    // Shows the startup screen.
    disp.init(oled::Config::new(oled::Scale::Triple)).unwrap();
    delay.delay_ms(1000_u16);

    disp.set_header("FUEL USED", oled::Alignment::Center);
    disp.show_placeholder(oled::Unit::Liter);
    disp.refresh().unwrap();

    // Pretend to burn 0.05 l every 200 ms. Only the value pages go out on each refresh.
    let mut centiliters: i32 = 0;
    loop {
        delay.delay_ms(200_u16);
        centiliters += 5;
        disp.set_value(centiliters, 2);
        disp.refresh().unwrap();
    }
}
