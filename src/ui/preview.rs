//! QR preview panel
//! Shows the bounded preview bitmap, or an empty frame when there is nothing
//! to display.

use iced::widget::image::Handle;
use iced::widget::{column, container, text, Image, Space};
use iced::{Alignment, Border, Color, Element, Length, Theme};
use image::RgbaImage;

use crate::Message;

/// Frame color around the preview
const FRAME: Color = Color::from_rgb(0.23, 0.25, 0.28);

/// Upload a preview bitmap as a texture handle
pub fn handle(preview: &RgbaImage) -> Handle {
    Handle::from_rgba(preview.width(), preview.height(), preview.as_raw().clone())
}

/// The preview frame, `size` x `size` logical pixels
pub fn panel<'a>(image: Option<&Handle>, caption: Option<String>, size: u32) -> Element<'a, Message> {
    let side = Length::Fixed(size as f32 + 10.0);

    let content: Element<'a, Message> = match image {
        Some(handle) => Image::new(handle.clone()).into(),
        None => Space::new(Length::Fixed(size as f32), Length::Fixed(size as f32)).into(),
    };

    let frame = container(content)
        .center(side)
        .style(|_theme: &Theme| container::Style {
            border: Border {
                color: FRAME,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..container::Style::default()
        });

    let mut panel = column![frame].spacing(6).align_x(Alignment::Center);
    if let Some(caption) = caption {
        panel = panel.push(text(caption).size(12));
    }
    panel.into()
}
