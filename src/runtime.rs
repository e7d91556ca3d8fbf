//! Runtime for coordinating the poller and the command dispatcher

use crate::backend::Backend;
use crate::consts::cli_consts::{COMMAND_QUEUE_SIZE, EVENT_QUEUE_SIZE};
use crate::events::Event;
use crate::workers::core::{EventSender, WorkerConfig};
use crate::workers::{Dispatcher, Poller, UserCommand};
use std::sync::Arc;
use tokio::sync::{Notify, broadcast, mpsc, watch};
use tokio::task::JoinHandle;

/// Channels the UI keeps once the workers are running
pub struct WorkerHandles {
    pub event_receiver: mpsc::Receiver<Event>,
    pub command_sender: mpsc::Sender<UserCommand>,
    pub join_handles: Vec<JoinHandle<()>>,
}

/// Start the poller and the dispatcher against one backend
pub fn start_workers(
    backend: Arc<dyn Backend>,
    config: WorkerConfig,
    shutdown: &broadcast::Sender<()>,
) -> WorkerHandles {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) = mpsc::channel::<UserCommand>(COMMAND_QUEUE_SIZE);
    let (confirmed_sender, confirmed_receiver) = watch::channel(None);
    let refresh = Arc::new(Notify::new());
    let event_sender = EventSender::new(event_sender);

    let poller = Poller::new(
        backend.clone(),
        event_sender.clone(),
        config,
        confirmed_sender,
        refresh.clone(),
    );
    let dispatcher = Dispatcher::new(backend, event_sender, confirmed_receiver, refresh);

    let join_handles = vec![
        poller.run(shutdown.subscribe()),
        dispatcher.run(command_receiver, shutdown.subscribe()),
    ];

    WorkerHandles {
        event_receiver,
        command_sender,
        join_handles,
    }
}
