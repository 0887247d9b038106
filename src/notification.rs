use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew::AppHandle;

use crate::dom;
use crate::error::{Result, SiteError};

const ENTER_DELAY_MS: u32 = 100;
const EXIT_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn name(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "exclamation-circle",
            ToastKind::Info => "info-circle",
        }
    }

    fn background(self) -> &'static str {
        match self {
            ToastKind::Success => "#48bb78",
            ToastKind::Error => "#e53e3e",
            ToastKind::Info => "#4299e1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    Show,
    Dismiss,
}

impl Phase {
    /// A dismissed toast never comes back, even if the slide-in timer
    /// fires late.
    pub fn next(self, action: PhaseAction) -> Phase {
        match (self, action) {
            (_, PhaseAction::Dismiss) => Phase::Leaving,
            (Phase::Entering, PhaseAction::Show) => Phase::Shown,
            (current, PhaseAction::Show) => current,
        }
    }

    /// Wait before the toast is torn down, only once it is leaving.
    pub fn teardown_delay_ms(self) -> Option<u32> {
        (self == Phase::Leaving).then_some(EXIT_MS)
    }

    fn offset(self) -> &'static str {
        match self {
            Phase::Shown => "translateX(0)",
            Phase::Entering | Phase::Leaving => "translateX(100%)",
        }
    }
}

#[derive(Debug, PartialEq)]
struct ToastPhase(Phase);

impl Reducible for ToastPhase {
    type Action = PhaseAction;

    fn reduce(self: Rc<Self>, action: PhaseAction) -> Rc<Self> {
        let next = self.0.next(action);
        if next == self.0 {
            self
        } else {
            Rc::new(ToastPhase(next))
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: String,
    pub kind: ToastKind,
    pub lifetime_ms: u32,
    /// Fired once the toast has slid out.
    pub on_gone: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let phase = use_reducer(|| ToastPhase(Phase::Entering));

    {
        let phase = phase.clone();
        let lifetime_ms = props.lifetime_ms;
        use_effect_with_deps(
            move |_| {
                let show = {
                    let phase = phase.clone();
                    Timeout::new(ENTER_DELAY_MS, move || phase.dispatch(PhaseAction::Show))
                };
                let dismiss =
                    Timeout::new(lifetime_ms, move || phase.dispatch(PhaseAction::Dismiss));
                move || {
                    drop(show);
                    drop(dismiss);
                }
            },
            (),
        );
    }

    {
        let on_gone = props.on_gone.clone();
        use_effect_with_deps(
            move |current: &Phase| {
                let removal = current
                    .teardown_delay_ms()
                    .map(|delay| Timeout::new(delay, move || on_gone.emit(())));
                move || drop(removal)
            },
            phase.0,
        );
    }

    let close = {
        let phase = phase.clone();
        Callback::from(move |_: MouseEvent| phase.dispatch(PhaseAction::Dismiss))
    };

    let style = format!(
        "position: fixed; top: 20px; right: 20px; background: {}; color: white; \
         padding: 1rem 1.5rem; border-radius: 8px; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15); \
         z-index: 10000; transform: {}; transition: transform 0.3s ease; max-width: 400px;",
        props.kind.background(),
        phase.0.offset(),
    );

    html! {
        <div class={classes!("notification", format!("notification-{}", props.kind.name()))} style={style}>
            <div class="notification-content">
                <i class={classes!("fas", format!("fa-{}", props.kind.icon()))}></i>
                <span>{ &props.message }</span>
                <button class="notification-close" onclick={close}>{"\u{00D7}"}</button>
            </div>
        </div>
    }
}

/// Pops a toast in the top-right corner. It slides out on its own after
/// `lifetime_ms` or when closed.
pub fn show_notification(message: &str, kind: ToastKind, lifetime_ms: u32) -> Result<()> {
    let document = dom::document()?;
    let body = document.body().ok_or(SiteError::MissingElement("body"))?;
    let host = document.create_element("div")?;
    host.set_class_name("notification-host");
    body.append_child(&host)?;

    debug!("showing {} notification", kind.name());
    let app: Rc<RefCell<Option<AppHandle<Toast>>>> = Rc::default();
    let on_gone = {
        let app = app.clone();
        let host = host.clone();
        Callback::from(move |()| {
            if let Some(app) = app.borrow_mut().take() {
                app.destroy();
            }
            host.remove();
        })
    };
    let props = ToastProps {
        message: message.to_string(),
        kind,
        lifetime_ms,
        on_gone,
    };
    let handle = yew::Renderer::<Toast>::with_root_and_props(host, props).render();
    *app.borrow_mut() = Some(handle);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slides_in_then_out() {
        let shown = Phase::Entering.next(PhaseAction::Show);
        assert_eq!(shown, Phase::Shown);
        assert_eq!(shown.next(PhaseAction::Dismiss), Phase::Leaving);
    }

    #[test]
    fn late_show_does_not_revive_dismissed_toast() {
        let leaving = Phase::Entering.next(PhaseAction::Dismiss);
        assert_eq!(leaving.next(PhaseAction::Show), Phase::Leaving);
    }

    #[test]
    fn dismiss_twice_is_harmless() {
        let leaving = Phase::Shown.next(PhaseAction::Dismiss);
        assert_eq!(leaving.next(PhaseAction::Dismiss), Phase::Leaving);
    }

    #[test]
    fn teardown_is_scheduled_only_when_leaving() {
        assert_eq!(Phase::Entering.teardown_delay_ms(), None);
        assert_eq!(Phase::Shown.teardown_delay_ms(), None);
        assert_eq!(Phase::Leaving.teardown_delay_ms(), Some(300));
    }

    #[test]
    fn kinds_have_distinct_colours() {
        assert_eq!(ToastKind::Success.background(), "#48bb78");
        assert_eq!(ToastKind::Error.background(), "#e53e3e");
        assert_eq!(ToastKind::Info.icon(), "info-circle");
    }
}
