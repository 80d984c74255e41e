use chrono::{Days, Local};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::booking::state::{
    init, reduce, BookingEvent, BookingState, Command, DialogState, Notice, NoticeIntent,
};
use crate::components::{ConfirmationDialog, RescheduleDialog, SlotSelector};
use crate::server::{
    cancel_booking, get_available_dates, get_day_schedule, reschedule_booking, save_booking,
    server_error_message,
};

/// Bookings can be made up to two weeks out.
const BOOKING_WINDOW_DAYS: u64 = 14;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The appointment booking widget: a date strip for the coming two weeks,
/// the open slots for the selected date, the caller's existing bookings,
/// and the confirm/cancel/reschedule flows on top of them.
///
/// All transitions go through [`reduce`]; this component only renders the
/// state and runs the commands the reducer asks for.
#[component]
pub fn BookingWidget() -> impl IntoView {
    let today = Local::now().date_naive();
    let horizon = today + Days::new(BOOKING_WINDOW_DAYS);
    let min_date = today.format(DATE_FORMAT).to_string();
    let max_date = horizon.format(DATE_FORMAT).to_string();

    let (initial, startup) = init(min_date, max_date);
    let state = RwSignal::new(initial);
    let banner = RwSignal::new(NoticeBanner::default());

    // Effects only run in the browser, so server rendering ships the
    // loading shell and the client kicks off the first fetch.
    Effect::new(move |_| {
        for command in startup.clone() {
            run(state, banner, command);
        }
    });

    let dates = Signal::derive(move || state.get().dates);
    let loading_dates = Signal::derive(move || state.get().loading_dates);
    let selected_date = Signal::derive(move || state.get().selected_date);
    let loading_slots = Signal::derive(move || state.get().loading_slots);
    let open_slots = Signal::derive(move || state.get().open_slots);
    let booked_slots = Signal::derive(move || state.get().booked_slots);
    let saving = Signal::derive(move || state.get().saving);
    let cancelling = Signal::derive(move || state.get().cancelling.is_some());
    let confirm_disabled = Signal::derive(move || !state.get().confirm_enabled());
    let reschedule_draft = Signal::derive(move || state.get().reschedule_draft().cloned());
    // The reschedule dialog takes its date bounds from the same window the
    // reducer enforces.
    let min_date = Signal::derive(move || state.get().min_date);
    let max_date = Signal::derive(move || state.get().max_date);
    let confirmation = Signal::derive(move || match state.get().dialog {
        DialogState::Confirmed(receipt) => Some(receipt),
        _ => None,
    });

    view! {
        <div class="booking-widget">
            {move || {
                banner.get().current.map(|current| {
                    let class = match current.intent {
                        NoticeIntent::Success => "notice-banner success",
                        NoticeIntent::Error => "notice-banner error",
                    };
                    view! {
                        <div class=class>
                            <div class="notice-text">
                                <strong>{current.title}</strong>
                                <p>{current.message}</p>
                            </div>
                            <button
                                type="button"
                                class="notice-dismiss"
                                on:click=move |_| banner.update(|b| b.dismiss())
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
            }}

            <section class="date-section">
                <h2>"Select a Date"</h2>
                {move || {
                    if loading_dates.get() {
                        view! {
                            <div class="section-loading">
                                <Spinner size=SpinnerSize::Medium/>
                            </div>
                        }.into_any()
                    } else if dates.get().is_empty() {
                        view! {
                            <p class="empty-note">"No dates are open for booking right now."</p>
                        }.into_any()
                    } else {
                        view! {
                            <div class="date-strip">
                                {dates.get().into_iter().map(|date| {
                                    let id = date.id.clone();
                                    let selected = date.selected;
                                    view! {
                                        <button
                                            type="button"
                                            class="date-cell"
                                            class:selected=move || selected
                                            on:click=move |_| dispatch(
                                                state,
                                                banner,
                                                BookingEvent::DateSelected(id.clone()),
                                            )
                                        >
                                            <span class="date-day-name">{date.day_name}</span>
                                            <span class="date-day">{date.day}</span>
                                            <span class="date-month">{date.month}</span>
                                        </button>
                                    }
                                }).collect::<Vec<_>>()}
                            </div>
                        }.into_any()
                    }
                }}
            </section>

            {move || {
                selected_date.get().map(|date| view! {
                    <section class="slots-section">
                        <h2>"Available Slots"</h2>
                        <p class="slots-date">{date}</p>
                        <div class="slots-body">
                            {if loading_slots.get() {
                                view! {
                                    <div class="section-loading">
                                        <Spinner size=SpinnerSize::Small/>
                                    </div>
                                }.into_any()
                            } else if open_slots.get().is_empty() {
                                view! {
                                    <p class="empty-note">"No open slots for this date."</p>
                                }.into_any()
                            } else {
                                view! {
                                    <SlotSelector
                                        slots=open_slots
                                        on_slot_selected=move |time| dispatch(
                                            state,
                                            banner,
                                            BookingEvent::SlotSelected(time),
                                        )
                                    />
                                }.into_any()
                            }}
                        </div>
                        <div class="confirm-row">
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=confirm_disabled
                                loading=saving
                                on_click=move |_| dispatch(
                                    state,
                                    banner,
                                    BookingEvent::ConfirmRequested,
                                )
                            >
                                "Confirm Booking"
                            </Button>
                        </div>
                    </section>
                })
            }}

            {move || {
                let booked = booked_slots.get();
                if selected_date.get().is_none() || booked.is_empty() {
                    return None;
                }
                Some(view! {
                    <section class="booked-section">
                        <h2>"Your Bookings"</h2>
                        <div class="booked-list">
                            {booked.into_iter().map(|booking| {
                                let cancel_id = booking.booking_id.clone();
                                let reschedule_id = booking.booking_id.clone();
                                view! {
                                    <div class="booked-row">
                                        <span class="booked-time">{booking.time}</span>
                                        <span class="booked-tag">"Booked"</span>
                                        <div class="booked-actions">
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Secondary
                                                on_click=move |_| dispatch(
                                                    state,
                                                    banner,
                                                    BookingEvent::RescheduleOpened {
                                                        booking_id: reschedule_id.clone(),
                                                    },
                                                )
                                            >
                                                "Reschedule"
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                disabled=cancelling
                                                on_click=move |_| dispatch(
                                                    state,
                                                    banner,
                                                    BookingEvent::CancelRequested {
                                                        booking_id: cancel_id.clone(),
                                                    },
                                                )
                                            >
                                                "Cancel"
                                            </Button>
                                        </div>
                                    </div>
                                }
                            }).collect::<Vec<_>>()}
                        </div>
                    </section>
                })
            }}

            <RescheduleDialog
                draft=reschedule_draft
                min_date=min_date
                max_date=max_date
                on_date_change=move |date| dispatch(
                    state,
                    banner,
                    BookingEvent::RescheduleDateChanged(date),
                )
                on_slot_selected=move |time| dispatch(
                    state,
                    banner,
                    BookingEvent::RescheduleSlotSelected(time),
                )
                on_confirm=move || dispatch(state, banner, BookingEvent::RescheduleConfirmRequested)
                on_close=move || dispatch(state, banner, BookingEvent::RescheduleDismissed)
            />
            <ConfirmationDialog
                receipt=confirmation
                on_close=move || dispatch(state, banner, BookingEvent::ConfirmationDismissed)
            />
        </div>
    }
}

/// Runs one event through the reducer and executes whatever it asked for.
fn dispatch(state: RwSignal<BookingState>, banner: RwSignal<NoticeBanner>, event: BookingEvent) {
    let (next, commands) = reduce(state.get_untracked(), event);
    state.set(next);
    for command in commands {
        run(state, banner, command);
    }
}

/// Interprets one reducer command. Completions come back in as events, so
/// every response goes through the same staleness checks in the reducer.
fn run(state: RwSignal<BookingState>, banner: RwSignal<NoticeBanner>, command: Command) {
    match command {
        Command::Notify(notice) => {
            let mut shown = banner.get_untracked();
            let armed = shown.arm(notice);
            banner.set(shown);
            set_timeout(
                move || {
                    let mut shown = banner.get_untracked();
                    if shown.expire(armed) {
                        banner.set(shown);
                    }
                },
                std::time::Duration::from_secs(4),
            );
        }
        Command::LoadDates => {
            spawn_local(async move {
                match get_available_dates().await {
                    Ok(dates) => dispatch(state, banner, BookingEvent::DatesLoaded(dates)),
                    Err(e) => {
                        leptos::logging::error!("Failed to fetch available dates: {}", e);
                        dispatch(
                            state,
                            banner,
                            BookingEvent::DatesFailed(server_error_message(&e)),
                        );
                    }
                }
            });
        }
        Command::LoadSchedule { date } => {
            spawn_local(async move {
                match get_day_schedule(date.clone()).await {
                    Ok(schedule) => {
                        dispatch(state, banner, BookingEvent::ScheduleLoaded { date, schedule })
                    }
                    Err(e) => {
                        leptos::logging::error!("Failed to fetch slots for {}: {}", date, e);
                        dispatch(
                            state,
                            banner,
                            BookingEvent::ScheduleFailed {
                                date,
                                message: server_error_message(&e),
                            },
                        );
                    }
                }
            });
        }
        Command::LoadRescheduleSlots { date } => {
            spawn_local(async move {
                match get_day_schedule(date.clone()).await {
                    Ok(schedule) => dispatch(
                        state,
                        banner,
                        BookingEvent::RescheduleSlotsLoaded {
                            date,
                            times: schedule.available,
                        },
                    ),
                    Err(e) => {
                        leptos::logging::error!("Failed to fetch slots for {}: {}", date, e);
                        dispatch(
                            state,
                            banner,
                            BookingEvent::RescheduleSlotsFailed {
                                date,
                                message: server_error_message(&e),
                            },
                        );
                    }
                }
            });
        }
        Command::SaveBooking { date, time } => {
            spawn_local(async move {
                match save_booking(date, time).await {
                    Ok(receipt) => dispatch(state, banner, BookingEvent::BookingSaved(receipt)),
                    Err(e) => {
                        leptos::logging::error!("Failed to save booking: {}", e);
                        dispatch(
                            state,
                            banner,
                            BookingEvent::BookingFailed(server_error_message(&e)),
                        );
                    }
                }
            });
        }
        Command::CancelBooking { booking_id } => {
            spawn_local(async move {
                match cancel_booking(booking_id.clone()).await {
                    Ok(()) => {
                        dispatch(state, banner, BookingEvent::CancelCompleted { booking_id })
                    }
                    Err(e) => {
                        leptos::logging::error!("Failed to cancel booking {}: {}", booking_id, e);
                        dispatch(
                            state,
                            banner,
                            BookingEvent::CancelFailed {
                                booking_id,
                                message: server_error_message(&e),
                            },
                        );
                    }
                }
            });
        }
        Command::RescheduleBooking {
            booking_id,
            new_date,
            new_time,
        } => {
            spawn_local(async move {
                match reschedule_booking(booking_id.clone(), new_date, new_time).await {
                    Ok(receipt) => dispatch(state, banner, BookingEvent::RescheduleSaved(receipt)),
                    Err(e) => {
                        leptos::logging::error!("Failed to reschedule booking {}: {}", booking_id, e);
                        dispatch(
                            state,
                            banner,
                            BookingEvent::RescheduleFailed(server_error_message(&e)),
                        );
                    }
                }
            });
        }
    }
}

/// What the transient banner is showing. Arming bumps the serial, and a
/// dismiss timer clears the banner only while its serial is still
/// current, so a repeat of the same message gets its own four seconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct NoticeBanner {
    serial: u64,
    current: Option<Notice>,
}

impl NoticeBanner {
    /// Shows a notice and returns the serial its timer should carry.
    fn arm(&mut self, notice: Notice) -> u64 {
        self.serial += 1;
        self.current = Some(notice);
        self.serial
    }

    /// Clears the banner if `armed` is still the notice on display.
    /// Returns whether anything changed.
    fn expire(&mut self, armed: u64) -> bool {
        if self.serial == armed && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_timer_clears_only_the_notice_it_was_armed_for() {
        let mut banner = NoticeBanner::default();
        let first = banner.arm(Notice::error("SlotTaken"));
        let second = banner.arm(Notice::error("SlotTaken"));

        // The first timer fires after an identical repeat replaced it.
        assert!(!banner.expire(first));
        assert!(banner.current.is_some());

        assert!(banner.expire(second));
        assert_eq!(banner.current, None);
    }

    #[test]
    fn manual_dismissal_does_not_block_later_notices() {
        let mut banner = NoticeBanner::default();
        let armed = banner.arm(Notice::success("Appointment cancelled."));
        banner.dismiss();
        assert_eq!(banner.current, None);

        let replacement = banner.arm(Notice::error("SlotTaken"));
        assert!(!banner.expire(armed));
        assert!(banner.current.is_some());
        assert!(banner.expire(replacement));
        assert_eq!(banner.current, None);
    }
}
