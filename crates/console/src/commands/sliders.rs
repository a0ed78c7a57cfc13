use herald_client::ClientConfig;
use herald_core::ordering::{is_dense_permutation, Direction};
use herald_core::slider::{SliderDraft, SliderItem};
use herald_core::Resource;

use crate::cli::{CreateSliderArgs, DeleteArgs, EditSliderArgs, SlidersCommand, ToggleArgs};
use crate::commands::{attachment_failed, print_rows, read_attachment, Console};
use crate::controller::{
    DeleteOutcome, FormController, ListController, OperationError, ReorderController,
    ReorderOutcome,
};
use crate::screen::Screen;

type SliderList = ListController<SliderItem, herald_client::ResourceClient<SliderItem>>;

pub async fn run(console: &Console, command: SlidersCommand) -> Result<(), OperationError> {
    match command {
        SlidersCommand::List(args) => list(console, &args.search).await,
        SlidersCommand::Create(args) => create(console, args).await,
        SlidersCommand::Edit(args) => edit(console, args).await,
        SlidersCommand::Delete(args) => delete(console, args).await,
        SlidersCommand::Move { id, direction } => {
            move_item(console, &id, direction.into()).await
        }
        SlidersCommand::Toggle(args) => toggle(console, args).await,
    }
}

async fn load(console: &Console) -> Result<SliderList, OperationError> {
    let mut screen = ListController::new(console.client().sliders(), console.notifier());
    screen.load().await?;
    screen.sort_by_ordinal();
    if !is_dense_permutation(screen.items()) {
        tracing::warn!(
            count = screen.items().len(),
            "Slider order is not a dense 1..N sequence"
        );
    }
    Ok(screen)
}

async fn list(console: &Console, query: &str) -> Result<(), OperationError> {
    let mut screen = load(console).await?;
    screen.set_search_query(query);

    let config = console.client().config();
    let rows: Vec<String> = screen
        .filtered()
        .into_iter()
        .map(|slider| render_slider(config, slider))
        .collect();
    print_rows(&rows, "No slider items found");
    Ok(())
}

async fn create(console: &Console, args: CreateSliderArgs) -> Result<(), OperationError> {
    let screen = load(console).await?;

    let mut draft = SliderDraft::new_after(screen.items());
    draft.title = args.title;
    draft.subtitle = args.subtitle;
    draft.link = args.link.unwrap_or_default();
    draft.is_active = !args.inactive;
    if let Some(order) = args.order {
        draft.order = order;
    }
    if let Some(path) = &args.image {
        let image = read_attachment(console.previews(), path).await.map_err(|e| {
            attachment_failed(
                console.notifier().as_ref(),
                SliderItem::MESSAGES.create_failed,
                e,
            )
        })?;
        draft.set_image(image);
    }

    submit(console, draft).await
}

async fn edit(console: &Console, args: EditSliderArgs) -> Result<(), OperationError> {
    let screen = load(console).await?;
    let failed = SliderItem::MESSAGES.update_failed;

    let Some(existing) = screen.find(&args.id) else {
        let err = herald_core::CoreError::NotFound {
            entity: SliderItem::NOUN,
            id: args.id.clone(),
        };
        console.notifier().error(failed);
        return Err(OperationError::new(failed, err));
    };

    let mut draft = SliderDraft::from_record(existing);
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(subtitle) = args.subtitle {
        draft.subtitle = subtitle;
    }
    if let Some(link) = args.link {
        draft.link = link;
    }
    if let Some(order) = args.order {
        draft.order = order;
    }
    if let Some(active) = args.active {
        draft.is_active = active;
    }
    if let Some(path) = &args.image {
        let image = read_attachment(console.previews(), path)
            .await
            .map_err(|e| attachment_failed(console.notifier().as_ref(), failed, e))?;
        draft.set_image(image);
    }

    submit(console, draft).await
}

async fn submit(console: &Console, draft: SliderDraft) -> Result<(), OperationError> {
    let mut form = FormController::new(console.client().sliders(), console.notifier(), draft);
    if let Some(slider) = form.submit().await? {
        println!("{}", render_slider(console.client().config(), &slider));
    }
    Ok(())
}

async fn delete(console: &Console, args: DeleteArgs) -> Result<(), OperationError> {
    let mut screen = load(console).await?;
    let confirm = console.confirm(args.yes);
    if screen.delete(&args.id, confirm.as_ref()).await? == DeleteOutcome::Cancelled {
        println!("Cancelled");
    }
    Ok(())
}

async fn move_item(
    console: &Console,
    id: &str,
    direction: Direction,
) -> Result<(), OperationError> {
    let mut screen = load(console).await?;
    let reorder = ReorderController::new(
        console.client().config().reorder_mode,
        console.notifier(),
    );

    if reorder.move_item(&mut screen, id, direction).await? == ReorderOutcome::Unchanged {
        let end = match direction {
            Direction::Up => "top",
            Direction::Down => "bottom",
        };
        println!("Already at the {end} of the list");
        return Ok(());
    }

    let config = console.client().config();
    for slider in screen.items() {
        println!("{}", render_slider(config, slider));
    }
    Ok(())
}

async fn toggle(console: &Console, args: ToggleArgs) -> Result<(), OperationError> {
    let mut screen = load(console).await?;
    screen.toggle_active(&args.id, args.active).await?;
    if let Some(slider) = screen.find(&args.id) {
        println!("{}", render_slider(console.client().config(), slider));
    }
    Ok(())
}

fn render_slider(config: &ClientConfig, slider: &SliderItem) -> String {
    let status = if slider.is_active { "active" } else { "inactive" };
    let image = if slider.image_url.is_empty() {
        "No image".to_string()
    } else {
        config.asset_url(&slider.image_url)
    };
    format!(
        "#{order}  {id}  {title}  {subtitle}  ({status})  {image}",
        order = slider.order,
        id = slider.id,
        title = slider.title,
        subtitle = slider.subtitle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_image_against_asset_base() {
        let mut config = ClientConfig::new("https://api.example.com/api");
        config.asset_base_url = "https://cdn.example.com".into();
        let slider = SliderItem {
            id: "s1".into(),
            title: "Welcome".into(),
            subtitle: "Hello".into(),
            order: 1,
            is_active: true,
            image_url: "/uploads/s1.jpg".into(),
            link: None,
        };
        assert_eq!(
            render_slider(&config, &slider),
            "#1  s1  Welcome  Hello  (active)  https://cdn.example.com/uploads/s1.jpg"
        );
    }
}
