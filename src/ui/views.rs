/// Page views
///
/// Pure view builders for the header and the three screens of the
/// drill-down. All interaction is reported through [`Message`]; no
/// state lives here.

use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, horizontal_space, image, row, scrollable, text,
};
use iced::{Alignment, ContentFit, Element, Length, Size};
use iced_aw::Wrap;

use crate::catalog::{self, Stack, Template};
use crate::state::nav::NavCategory;
use crate::state::run::{RemixRun, RunState};
use crate::ui::tile;
use crate::{DownloadFormat, Message};

const STACK_TILE: Size = Size::new(420.0, 315.0);
const TEMPLATE_TILE: Size = Size::new(240.0, 320.0);
const CAROUSEL_TILE: Size = Size::new(320.0, 180.0);

/// Fixed header: brand plus the three nav category buttons.
pub fn header(active: NavCategory) -> Element<'static, Message> {
    let mut nav = row![].spacing(8);
    for category in NavCategory::ALL {
        let style = if category == active {
            button::primary
        } else {
            button::text
        };
        nav = nav.push(
            button(text(category.label()).size(18))
                .style(style)
                .padding([10, 28])
                .on_press(Message::CategorySelected(category)),
        );
    }

    container(
        row![text("Remix Studio").size(24), nav, horizontal_space()]
            .spacing(48)
            .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([16, 32])
    .style(container::bordered_box)
    .into()
}

/// Home: the trending carousel followed by the stack grid.
pub fn home_page() -> Element<'static, Message> {
    let mut filmstrip = row![].spacing(24);
    for template in catalog::trending() {
        filmstrip = filmstrip.push(tile::tile(
            container::Id::new(format!("trending-{}", template.id)),
            template.image_url,
            Some(template.name),
            CAROUSEL_TILE,
            Message::TemplateSelected(template),
            None,
        ));
    }

    // The filmstrip scrolls sideways with its scrollbar suppressed on
    // this widget alone.
    let carousel = scrollable(filmstrip)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill);

    let stack_tiles: Vec<Element<'static, Message>> = catalog::stacks()
        .iter()
        .map(|stack| {
            let id = tile::stack_tile_id(stack.id);
            tile::tile(
                id.clone(),
                stack.image_url,
                Some(stack.name),
                STACK_TILE,
                Message::StackSelected(stack),
                Some((
                    Message::TileHovered {
                        image_url: stack.image_url.to_string(),
                        anchor: id,
                    },
                    Message::TileUnhovered,
                )),
            )
        })
        .collect();

    column![
        text("Trending Now").size(28),
        carousel,
        text("All Stacks").size(28),
        Wrap::with_elements(stack_tiles)
            .spacing(24.0)
            .line_spacing(24.0),
    ]
    .spacing(24)
    .padding(32)
    .width(Length::Fill)
    .into()
}

/// Stack drill-down: back link, title, and the stack's templates.
pub fn stack_page(stack: &'static Stack) -> Element<'static, Message> {
    let template_tiles: Vec<Element<'static, Message>> = catalog::templates_in(stack.id)
        .map(|template| {
            let id = tile::template_tile_id(template.id);
            tile::tile(
                id.clone(),
                template.image_url,
                Some(template.name),
                TEMPLATE_TILE,
                Message::TemplateSelected(template),
                Some((
                    Message::TileHovered {
                        image_url: template.image_url.to_string(),
                        anchor: id,
                    },
                    Message::TileUnhovered,
                )),
            )
        })
        .collect();

    column![
        back_link("Back to Stacks".to_string()),
        text(stack.name).size(36),
        text("Choose a template to start remixing your image.").style(text::secondary),
        Wrap::with_elements(template_tiles)
            .spacing(24.0)
            .line_spacing(24.0),
    ]
    .spacing(16)
    .padding(32)
    .width(Length::Fill)
    .into()
}

/// Template execution: upload, remix, and the run's current panel.
pub fn execution_page<'a>(
    template: &'static Template,
    stack: &'static Stack,
    run: &'a RemixRun,
    photo_preview: Option<&'a Handle>,
    result: Option<&'a Handle>,
) -> Element<'a, Message> {
    let intro = column![
        text(template.name).size(36),
        text("Upload your photo and let the AI work its magic.").style(text::secondary),
        text(format!("Output aspect ratio: {}", template.aspect_ratio.label()))
            .size(14)
            .style(text::secondary),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let panel: Element<'a, Message> = match run.state() {
        RunState::Loading => loading_panel(),
        // The upload zone stays available under the error, so the user
        // can swap the photo before trying again.
        RunState::Failed(message) => column![
            upload_panel(run, photo_preview),
            error_panel(message),
        ]
        .spacing(24)
        .into(),
        RunState::Succeeded(_) => result_panel(stack, result),
        RunState::Idle => upload_panel(run, photo_preview),
    };

    column![
        back_link(format!("Back to {}", stack.name)),
        container(intro).center_x(Length::Fill),
        panel,
    ]
    .spacing(24)
    .padding(32)
    .width(Length::Fill)
    .into()
}

fn upload_panel<'a>(run: &'a RemixRun, photo_preview: Option<&'a Handle>) -> Element<'a, Message> {
    let zone: Element<'a, Message> = match photo_preview {
        Some(handle) => column![
            container(
                image(handle.clone())
                    .width(Length::Fixed(360.0))
                    .height(Length::Fixed(360.0))
                    .content_fit(ContentFit::Contain),
            )
            .padding(8)
            .style(container::rounded_box),
            row![
                button(text("Choose a different photo")).style(button::text).on_press(Message::PickPhoto),
                button(text("Remove")).style(button::text).on_press(Message::ClearPhoto),
            ]
            .spacing(8),
        ]
        .spacing(8)
        .align_x(Alignment::Center)
        .into(),
        None => button(
            container(
                column![
                    text("Upload Your Image").size(20),
                    text("Drag & drop or click to browse").style(text::secondary),
                    text("JPG, PNG, WebP up to 10MB").size(13).style(text::secondary),
                ]
                .spacing(8)
                .align_x(Alignment::Center),
            )
            .center(Length::Fixed(360.0)),
        )
        .style(button::secondary)
        .on_press(Message::PickPhoto)
        .into(),
    };

    let remix = button(text("Remix Image").size(20))
        .style(button::primary)
        .padding([16, 48])
        .on_press_maybe(run.photo().map(|_| Message::RemixPressed));

    column![zone, remix]
        .spacing(24)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
}

fn loading_panel<'a>() -> Element<'a, Message> {
    container(
        column![
            text("Generating your image...").size(24),
            text("This usually takes about 10-15 seconds. Please wait.").style(text::secondary),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .padding(64)
    .center_x(Length::Fill)
    .into()
}

fn error_panel(message: &str) -> Element<'_, Message> {
    container(
        column![
            text("Error").style(text::danger),
            text(message).style(text::danger),
            button(text("Try Again"))
                .style(button::danger)
                .on_press(Message::RemixPressed),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(32)
    .center_x(Length::Fill)
    .into()
}

fn result_panel<'a>(stack: &'static Stack, result: Option<&'a Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match result {
        Some(handle) => container(
            image(handle.clone())
                .width(Length::Fixed(720.0))
                .content_fit(ContentFit::Contain),
        )
        .padding(8)
        .style(container::rounded_box)
        .into(),
        None => text("The generated image could not be displayed.")
            .style(text::danger)
            .into(),
    };

    column![
        picture,
        row![
            button(text("Download PNG"))
                .style(button::success)
                .on_press(Message::Download(DownloadFormat::Png)),
            button(text("Download JPG"))
                .style(button::success)
                .on_press(Message::Download(DownloadFormat::Jpeg)),
            button(text("Remix Again"))
                .style(button::secondary)
                .on_press(Message::ResetRun),
            button(text(format!("Back to {}", stack.name)))
                .style(button::text)
                .on_press(Message::BackPressed),
        ]
        .spacing(12),
    ]
    .spacing(24)
    .align_x(Alignment::Center)
    .width(Length::Fill)
    .into()
}

fn back_link(label: String) -> Element<'static, Message> {
    button(text(format!("← {}", label)))
        .style(button::text)
        .on_press(Message::BackPressed)
        .into()
}
