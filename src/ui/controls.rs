use iced::widget::{button, pick_list, row, text};
use iced::{Alignment, Background, Border, Color, Element, Theme};
use iced_aw::helpers::color_picker;
use image::Rgb;

use crate::color;
use crate::i18n::Strings;
use crate::state::settings::EcLevel;
use crate::{ColorTarget, Message};

/// Error-correction dropdown plus the info button
pub fn ec_picker<'a>(strings: &'static Strings, selected: EcLevel) -> Element<'a, Message> {
    row![
        text(strings.ec_label).size(14),
        pick_list(EcLevel::ALL, Some(selected), Message::EcLevelSelected).padding(6),
        button(text(strings.ec_info_button)).on_press(Message::ShowEcInfo).padding(6),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// A button painted in `value` that opens a color picker when pressed
///
/// Cancelling the picker leaves the color unchanged.
pub fn color_swatch<'a>(
    label: &'static str,
    value: Rgb<u8>,
    target: ColorTarget,
    open: bool,
) -> Element<'a, Message> {
    let fill = color::to_iced(value);
    let label_color = if color::luminance(value) > 140 {
        Color::BLACK
    } else {
        Color::WHITE
    };

    let swatch = button(text(format!("{} {}", label, color::to_hex(value))).size(14))
        .padding(8)
        .on_press(Message::OpenColorPicker(target))
        .style(move |_theme: &Theme, _status| button::Style {
            background: Some(Background::Color(fill)),
            text_color: label_color,
            border: Border {
                color: Color::from_rgb8(0x3B, 0x40, 0x48),
                width: 1.0,
                radius: 4.0.into(),
            },
            ..button::Style::default()
        });

    color_picker(open, fill, swatch, Message::ColorPickerCancelled, move |picked| {
        Message::ColorPicked(target, picked)
    })
    .into()
}
