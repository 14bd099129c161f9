//! ILI9341 panel adapter
//!
//! Implements the `quill-display` frame-driver contract on top of an
//! `embedded-graphics` draw target (the mipidsi ILI9341 driver over SPI).
//! Fonts are the embedded-graphics mono fonts and icons are const 1-bpp
//! bitmaps; both are exposed to the renderer as opaque handles.
//!
//! Draw calls are best-effort: device errors are swallowed here.

pub mod icons;

use core::fmt::Write as _;

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{Blocking, Spi};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_6X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use heapless::String;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9341Rgb565;
use mipidsi::Display;

use quill_display::{Assets, FontHandle, FrameDriver, Hsv, ImageHandle};

use icons::{Icon, ICONS, ICON_HEIGHT, ICON_WIDTH};

/// SPI device driving the panel
pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;

/// Concrete mipidsi target for this board
pub type PanelTarget =
    Display<SpiInterface<'static, PanelSpi, Output<'static>>, ILI9341Rgb565, Output<'static>>;

/// The panel as spawned into the UI task
pub type IliPanel = Panel<PanelTarget>;

pub const FONT_TITLE: FontHandle = FontHandle(0);
pub const FONT_MONO: FontHandle = FontHandle(1);
pub const FONT_UI: FontHandle = FontHandle(2);

const FONTS: [&MonoFont<'static>; 3] = [&FONT_6X13, &FONT_5X8, &FONT_6X10];

/// Asset handles handed to the renderer at startup
pub fn assets() -> Assets {
    Assets {
        font_title: FONT_TITLE,
        font_mono: FONT_MONO,
        font_ui: FONT_UI,
        lock_caps_on: ImageHandle(0),
        lock_caps_off: ImageHandle(1),
        lock_num_on: ImageHandle(2),
        lock_num_off: ImageHandle(3),
        lock_scrl_on: ImageHandle(4),
        lock_scrl_off: ImageHandle(5),
        cg_on: ImageHandle(6),
        cg_off: ImageHandle(7),
    }
}

fn font(handle: FontHandle) -> &'static MonoFont<'static> {
    FONTS[handle.0 as usize % FONTS.len()]
}

fn icon(handle: ImageHandle) -> &'static Icon {
    ICONS[handle.0 as usize % ICONS.len()]
}

fn rgb(color: Hsv) -> Rgb565 {
    let (r, g, b) = color.to_rgb888();
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Frame driver over any RGB565 draw target
pub struct Panel<T> {
    target: T,
}

impl<T> Panel<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: T) -> Self {
        Self { target }
    }

    /// Startup chrome: border, title bar, centered (truncated) title
    pub fn draw_chrome(&mut self, title: &str) {
        self.clear();
        let (w, h) = self.dimensions();

        self.fill_rect(0, 0, w - 1, 0, Hsv::WHITE);
        self.fill_rect(0, h - 1, w - 1, h - 1, Hsv::WHITE);
        self.fill_rect(0, 0, 0, h - 1, Hsv::WHITE);
        self.fill_rect(w - 1, 0, w - 1, h - 1, Hsv::WHITE);

        let bar_h = self.line_height(FONT_TITLE) + 2;
        self.fill_rect(0, 0, w - 1, bar_h, Hsv::WHITE);

        let mut shown: String<50> = String::new();
        for c in title.chars() {
            if self.text_width(FONT_TITLE, &shown) >= w - 54 {
                break;
            }
            let _ = shown.write_char(c);
        }
        let title_w = self.text_width(FONT_TITLE, &shown);
        let x = (w.saturating_sub(title_w)) / 2;
        self.draw_text(x, 2, FONT_TITLE, &shown, Hsv::BLACK, Hsv::WHITE);
        self.flush();
    }
}

impl<T> FrameDriver for Panel<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    fn dimensions(&self) -> (u16, u16) {
        let size = self.target.bounding_box().size;
        (size.width as u16, size.height as u16)
    }

    fn clear(&mut self) {
        let _ = self.target.clear(Rgb565::BLACK);
    }

    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: Hsv) {
        let _ = Rectangle::with_corners(
            Point::new(x0 as i32, y0 as i32),
            Point::new(x1 as i32, y1 as i32),
        )
        .into_styled(PrimitiveStyle::with_fill(rgb(color)))
        .draw(&mut self.target);
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        handle: FontHandle,
        text: &str,
        fg: Hsv,
        bg: Hsv,
    ) -> u16 {
        let style = MonoTextStyleBuilder::new()
            .font(font(handle))
            .text_color(rgb(fg))
            .background_color(rgb(bg))
            .build();
        let _ = Text::with_baseline(text, Point::new(x as i32, y as i32), style, Baseline::Top)
            .draw(&mut self.target);
        self.text_width(handle, text)
    }

    fn draw_image(&mut self, x: u16, y: u16, handle: ImageHandle, fg: Hsv, bg: Hsv) {
        let bitmap = icon(handle);
        let area = Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(ICON_WIDTH as u32, ICON_HEIGHT as u32),
        );
        let fg = rgb(fg);
        let bg = rgb(bg);
        let colors = bitmap.rows.iter().flat_map(move |row| {
            (0..ICON_WIDTH).map(move |col| {
                if row & (0x8000 >> col) != 0 {
                    fg
                } else {
                    bg
                }
            })
        });
        let _ = self.target.fill_contiguous(&area, colors);
    }

    fn text_width(&self, handle: FontHandle, text: &str) -> u16 {
        let f = font(handle);
        let advance = f.character_size.width + f.character_spacing;
        (text.chars().count() as u32 * advance) as u16
    }

    fn line_height(&self, handle: FontHandle) -> u16 {
        font(handle).character_size.height as u16
    }

    fn image_size(&self, _handle: ImageHandle) -> (u16, u16) {
        (ICON_WIDTH, ICON_HEIGHT)
    }

    fn flush(&mut self) {
        // The mipidsi target writes through on every draw call
    }
}
