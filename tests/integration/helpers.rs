use std::cell::RefCell;
use std::rc::Rc;
use stepcopy::app::App;
use stepcopy::clipboard::ClipboardSink;
use stepcopy::overlay::{
    HostError, OverlayConfig, OverlayHost, OverlayService, ViewFrame, ViewId,
};
use stepcopy::store::{PrefWriter, Prefs};

/// Run a future inside a `LocalSet` -- the pref writer spawns local tasks.
pub async fn run_local<F: std::future::Future>(fut: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(fut).await
}

/// Clipboard sink whose writes stay inspectable after the sink is moved
/// into an app or service.
#[derive(Clone, Default)]
pub struct SharedClipboard(pub Rc<RefCell<Vec<String>>>);

impl ClipboardSink for SharedClipboard {
    fn set_text(&mut self, text: &str) {
        self.0.borrow_mut().push(text.to_owned());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Attach(ViewId),
    Update(ViewId),
    Detach(ViewId),
}

#[derive(Default)]
pub struct HostLog {
    pub calls: Vec<HostCall>,
    pub broken: bool,
}

/// Overlay host recording every call; flip `broken` to simulate a
/// torn-down surface.
#[derive(Clone, Default)]
pub struct TestHost(pub Rc<RefCell<HostLog>>);

impl OverlayHost for TestHost {
    fn attach(&mut self, view: ViewId, _frame: ViewFrame) -> Result<(), HostError> {
        let mut log = self.0.borrow_mut();
        if log.broken {
            return Err(HostError::SurfaceGone);
        }
        log.calls.push(HostCall::Attach(view));
        Ok(())
    }

    fn update(&mut self, view: ViewId, _frame: ViewFrame) -> Result<(), HostError> {
        let mut log = self.0.borrow_mut();
        if log.broken {
            return Err(HostError::SurfaceGone);
        }
        log.calls.push(HostCall::Update(view));
        Ok(())
    }

    fn detach(&mut self, view: ViewId) -> Result<(), HostError> {
        let mut log = self.0.borrow_mut();
        if log.broken {
            return Err(HostError::SurfaceGone);
        }
        log.calls.push(HostCall::Detach(view));
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct TestHaptics(pub Rc<RefCell<usize>>);

impl stepcopy::overlay::Haptics for TestHaptics {
    fn pulse(&mut self) {
        *self.0.borrow_mut() += 1;
    }
}

pub type TestService = OverlayService<TestHost, SharedClipboard, TestHaptics>;

pub struct ServiceFixture {
    pub service: TestService,
    pub prefs: Prefs,
    pub clipboard: Rc<RefCell<Vec<String>>>,
    pub host: Rc<RefCell<HostLog>>,
    pub haptic_pulses: Rc<RefCell<usize>>,
}

/// Overlay service over an in-memory store with recording collaborators.
/// Call inside `run_local`.
pub fn test_service() -> ServiceFixture {
    let prefs = Prefs::in_memory();
    let writer = PrefWriter::spawn(prefs.clone());
    let clipboard = SharedClipboard::default();
    let host = TestHost::default();
    let haptics = TestHaptics::default();
    ServiceFixture {
        clipboard: clipboard.0.clone(),
        host: host.0.clone(),
        haptic_pulses: haptics.0.clone(),
        service: OverlayService::new(
            prefs.clone(),
            writer,
            host,
            clipboard,
            haptics,
            OverlayConfig::default(),
        ),
        prefs,
    }
}

pub struct AppFixture {
    pub app: App,
    pub prefs: Prefs,
    pub clipboard: Rc<RefCell<Vec<String>>>,
}

/// Main-surface app over an in-memory store. Call inside `run_local`.
pub fn test_app() -> AppFixture {
    let prefs = Prefs::in_memory();
    let writer = PrefWriter::spawn(prefs.clone());
    let clipboard = SharedClipboard::default();
    let handle = clipboard.0.clone();
    AppFixture {
        app: App::new(prefs.clone(), writer, Box::new(clipboard)),
        prefs,
        clipboard: handle,
    }
}

/// Seed the store with a confirmed three-line session.
pub async fn seed_lines(prefs: &Prefs, lines: &[&str], index: usize, floating: bool) {
    let owned: Vec<String> = lines.iter().map(|&l| l.to_owned()).collect();
    prefs.save_input(&owned.join("\n")).await.unwrap();
    prefs.save_lines(&owned).await.unwrap();
    prefs.save_index(index).await.unwrap();
    prefs.save_floating_enabled(floating).await.unwrap();
}
