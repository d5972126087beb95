//! Walks a small server session through the player model and prints the tree.
//!
//! Run with `RUST_LOG=voxroster=debug` to see the model's mutation log.

use std::sync::Arc;

use voxroster::model::{
    DelegatePaintContext, DropAction, ItemDelegate, ItemModel, ModelIndex, StyleOptionViewItem,
    TreeViewState,
};
use voxroster::render::{DisplayList, Rect};
use voxroster::{
    ChannelId, Overlay, Player, PlayerDelegate, PlayerFlags, PlayerModel, RosterConfig,
    ServerHandler, ServerMessage, Session, SessionContext, TreeFormatOptions, TreeStyle,
};

struct PrintingServer;

impl ServerHandler for PrintingServer {
    fn send_message(&self, message: ServerMessage) {
        println!("-> server: {message:?}");
    }
}

struct PrintingOverlay;

impl Overlay for PrintingOverlay {
    fn set_players(&self, players: &[Player]) {
        let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        println!("overlay: {names:?}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::default(),
    };

    let me = Session(1);
    let view = Arc::new(TreeViewState::new());
    let context = SessionContext::new()
        .with_local_session(me)
        .with_server(Arc::new(PrintingServer))
        .with_overlay(Arc::new(PrintingOverlay))
        .with_view(view.clone());
    let model = PlayerModel::with_config(context, &config);

    model.add_channel(ChannelId(1), ChannelId::ROOT, "Lobby")?;
    model.add_channel(ChannelId(2), ChannelId::ROOT, "Games")?;
    model.add_channel(ChannelId(3), ChannelId(2), "Strategy")?;
    model.link_channels(ChannelId(1), &[ChannelId(3)])?;

    model.add_player(me, "me")?;
    model.add_player(Session(2), "bob")?;
    model.add_player(Session(3), "carol")?;
    model.move_player(me, ChannelId(1))?;
    model.move_player(Session(2), ChannelId(1))?;
    model.move_player(Session(3), ChannelId(3))?;
    model.set_player_state(Session(2), PlayerFlags::default().with_self_mute(true), Some(42))?;
    model.set_player_talking(Session(3), true, false)?;

    let options = TreeFormatOptions::detailed().with_style(TreeStyle::Unicode);
    print!("{}", model.format_tree(&options));
    println!("linked: {:?}", model.linked_channels());
    println!("expanded nodes: {}", view.expanded_count());

    // Drag carol onto bob: the model only asks the server to move her.
    let carol = model.index_of_player(Session(3), 0);
    let bob = model.index_of_player(Session(2), 0);
    if let Some(data) = model.mime_data(&[carol]) {
        model.drop_mime_data(&data, DropAction::COPY, None, None, &bob);
    }

    let delegate = PlayerDelegate::new().with_metrics(config.delegate);
    let status = model.index_of_player(Session(2), 1);
    let option = StyleOptionViewItem::from_model(&model, Rect::new(120.0, 18.0, 90.0, 18.0), status);
    let mut painter = DisplayList::new();
    delegate.paint(&mut DelegatePaintContext::new(&mut painter, option.rect), &option);
    for (rect, icon) in painter.icons() {
        println!("icon {} at ({}, {})", icon.name(), rect.left(), rect.top());
    }
    println!("status column wants {:?}", delegate.size_hint(&option));

    model.remove_all()?;
    println!("after reset: {} rows", model.row_count(&ModelIndex::invalid()));
    Ok(())
}
