/// Joke advertisement popup
///
/// A decorative fake ad in the spirit of the banners it parodies: one
/// entry from a built-in list, shown once at startup as a floating panel
/// until dismissed. Purely cosmetic; its image follows the same
/// hide-on-failure rule as gallery images.
use std::time::{SystemTime, UNIX_EPOCH};

use iced::widget::{button, column, container, image, row, stack, text};
use iced::{Alignment, Element, Length};

use crate::ui::TileImage;
use crate::Message;

const PANEL_WIDTH: f32 = 300.0;

#[derive(Debug)]
pub struct JokeAd {
    pub title: &'static str,
    pub body: &'static str,
    pub image_url: &'static str,
}

pub static JOKE_ADS: [JokeAd; 5] = [
    JokeAd {
        title: "FREE RAM DOWNLOAD!",
        body: "Double your computer memory instantly! Click here!",
        image_url: "https://pbs.twimg.com/media/Gmw-nNBWwAAzmJY?format=jpg&name=large",
    },
    JokeAd {
        title: "YOU'VE WON A PRIZE!",
        body: "Congratulations! You're our 1,000,000th visitor!",
        image_url: "https://pbs.twimg.com/media/Gndb_U1WsAAaKLc?format=jpg&name=large",
    },
    JokeAd {
        title: "GIT RIPPED IN SECONDS",
        body: "Try this new fitness program! Only 50$ a month!",
        image_url: "https://pbs.twimg.com/media/GplDs2WWoAA5DlO?format=jpg&name=large",
    },
    JokeAd {
        title: "LIMITED TIME OFFER!",
        body: "2 Coffin's for the price of 1! Only while supply lasts!",
        image_url: "https://pbs.twimg.com/media/Gpk9rCBWgAAmfrn?format=jpg&name=large",
    },
    JokeAd {
        title: "HOT GIRLS IN YOUR AREA!",
        body: "She will give you a night that you will neither forget nor survive",
        image_url: "https://pbs.twimg.com/media/Gm6U17XXQAA36na?format=jpg&name=large",
    },
];

/// Pick the ad for this session. Time-seeded; good enough for a gag.
pub fn pick() -> &'static JokeAd {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    &JOKE_ADS[nanos as usize % JOKE_ADS.len()]
}

/// Float the ad panel over the bottom-right corner of `base`
pub fn overlay<'a>(
    base: Element<'a, Message>,
    ad: &JokeAd,
    image_state: &'a TileImage,
) -> Element<'a, Message> {
    let mut content = column![row![
        text(ad.title).size(16),
        iced::widget::horizontal_space(),
        button(text("✕").size(12))
            .style(button::text)
            .on_press(Message::AdDismissed),
    ]
    .align_y(Alignment::Center)]
    .spacing(8);

    if let Some(handle) = image_state.handle() {
        content = content.push(image(handle.clone()).width(Length::Fill));
    }
    content = content.push(text(ad.body).size(13));

    let panel = container(content)
        .padding(12)
        .width(Length::Fixed(PANEL_WIDTH))
        .style(container::rounded_box);

    let positioned = container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Alignment::End)
        .align_y(Alignment::End)
        .padding(20);

    stack![base, positioned].into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_always_returns_a_known_ad() {
        let ad = pick();
        assert!(JOKE_ADS.iter().any(|known| std::ptr::eq(known, ad)));
    }
}
