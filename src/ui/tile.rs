/// The shared catalog tile
///
/// Stacks, templates and carousel entries all render through this one
/// builder: an image card that can be clicked to select and, for the
/// grids, hovered to request a floating preview. The card's container
/// carries an id so the hover scheduler can measure its on-screen
/// rectangle when the show timer fires.

use iced::mouse::Interaction;
use iced::widget::image::Handle;
use iced::widget::{column, container, image, mouse_area, text};
use iced::{ContentFit, Element, Length, Size};

use crate::Message;

/// Build one selectable tile. `hover` carries the (enter, exit)
/// messages for tiles that publish a preview; carousel tiles pass
/// `None`.
pub fn tile<'a>(
    id: container::Id,
    image_url: &'a str,
    caption: Option<&'a str>,
    size: Size,
    on_select: Message,
    hover: Option<(Message, Message)>,
) -> Element<'a, Message> {
    let card = container(
        image(Handle::from_path(image_url))
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover),
    )
    .id(id)
    .width(Length::Fixed(size.width))
    .height(Length::Fixed(size.height))
    .clip(true)
    .style(container::rounded_box);

    let content: Element<'a, Message> = match caption {
        Some(name) => column![card, text(name).size(16)].spacing(8).into(),
        None => card.into(),
    };

    let mut area = mouse_area(content)
        .interaction(Interaction::Pointer)
        .on_press(on_select);

    if let Some((enter, exit)) = hover {
        area = area.on_enter(enter).on_exit(exit);
    }

    area.into()
}

/// Stable container id for a stack tile.
pub fn stack_tile_id(stack_id: &str) -> container::Id {
    container::Id::new(format!("stack-{}", stack_id))
}

/// Stable container id for a template tile.
pub fn template_tile_id(template_id: &str) -> container::Id {
    container::Id::new(format!("template-{}", template_id))
}
