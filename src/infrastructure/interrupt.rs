use tokio::sync::watch;

/// Flag flipped by Ctrl-C or SIGTERM. The scan polls it between thread pages
/// so an operator can stop a run without killing a half-submitted form.
#[derive(Clone)]
pub struct Interrupt {
    receiver: watch::Receiver<bool>,
}

impl Interrupt {
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }
}

pub fn install() -> Interrupt {
    let (sender, receiver) = watch::channel(false);

    let ctrlc = sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrlc.send(true);
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        tokio::spawn(async move {
            if let Ok(mut sig) = signal(SignalKind::terminate()) {
                sig.recv().await;
                let _ = sender.send(true);
            }
        });
    }

    Interrupt { receiver }
}
