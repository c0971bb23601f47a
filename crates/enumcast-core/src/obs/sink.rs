//! Metrics sink boundary.
//!
//! Cast and registry logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through CastEvent and CastSink.

use crate::obs::metrics;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn CastSink>>> = const { RefCell::new(None) };
}

///
/// CastDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CastDirection {
    Out,
    In,
}

///
/// RejectReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    UnknownMember,
    UnknownEnumType,
    NotNullable,
    TypeMismatch,
    DelimiterInKey,
}

///
/// CastEvent
///

#[derive(Clone, Copy, Debug)]
pub enum CastEvent<'a> {
    Registered {
        enum_path: &'a str,
        members: usize,
    },
    Cast {
        direction: CastDirection,
        field: &'a str,
        null: bool,
    },
    Rejected {
        direction: CastDirection,
        field: &'a str,
        reason: RejectReason,
    },
}

///
/// CastSink
///

pub trait CastSink {
    fn record(&self, event: CastEvent<'_>);
}

/// GlobalCastSink
/// Default sink that writes into the per-thread metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalCastSink;

impl CastSink for GlobalCastSink {
    fn record(&self, event: CastEvent<'_>) {
        match event {
            CastEvent::Registered { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.registrations = m.ops.registrations.saturating_add(1);
                });
            }

            CastEvent::Cast {
                direction,
                field,
                null,
            } => {
                metrics::with_state_mut(|m| {
                    match direction {
                        CastDirection::Out => {
                            m.ops.casts_out = m.ops.casts_out.saturating_add(1);
                            if null {
                                m.ops.nulls_out = m.ops.nulls_out.saturating_add(1);
                            }
                        }
                        CastDirection::In => {
                            m.ops.casts_in = m.ops.casts_in.saturating_add(1);
                            if null {
                                m.ops.nulls_in = m.ops.nulls_in.saturating_add(1);
                            }
                        }
                    }

                    let entry = m.fields.entry(field.to_string()).or_default();
                    match direction {
                        CastDirection::Out => entry.casts_out = entry.casts_out.saturating_add(1),
                        CastDirection::In => entry.casts_in = entry.casts_in.saturating_add(1),
                    }
                });
            }

            CastEvent::Rejected { field, reason, .. } => {
                metrics::with_state_mut(|m| {
                    let counter = match reason {
                        RejectReason::UnknownMember => &mut m.ops.unknown_members,
                        RejectReason::UnknownEnumType => &mut m.ops.unknown_enum_types,
                        RejectReason::NotNullable => &mut m.ops.not_nullable,
                        RejectReason::TypeMismatch => &mut m.ops.type_mismatches,
                        RejectReason::DelimiterInKey => &mut m.ops.delimiter_in_key,
                    };
                    *counter = counter.saturating_add(1);

                    let entry = m.fields.entry(field.to_string()).or_default();
                    entry.rejections = entry.rejections.saturating_add(1);
                });
            }
        }
    }
}

/// Record one event on the scoped override, or on the global sink.
pub(crate) fn record(event: CastEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GlobalCastSink.record(event),
    }
}

/// Run `f` with `sink` installed for the current thread.
/// The previous sink is restored afterwards, even if `f` panics.
pub fn with_sink<T>(sink: Rc<dyn CastSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn CastSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = previous);
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cast::{AttributeCaster, CastInput},
        model::FieldModel,
        test_fixtures::{StatusEnum, registry},
    };
    use std::cell::RefCell;

    #[derive(Default)]
    struct CapturingSink {
        events: RefCell<Vec<String>>,
    }

    impl CastSink for CapturingSink {
        fn record(&self, event: CastEvent<'_>) {
            self.events.borrow_mut().push(format!("{event:?}"));
        }
    }

    #[test]
    fn scoped_sink_sees_casts_and_rejections() {
        let caster = AttributeCaster::new(registry());
        let field = FieldModel::set::<StatusEnum>("set_of_enums");
        let sink = Rc::new(CapturingSink::default());

        with_sink(sink.clone(), || {
            let _ = caster.cast_out(&field, &CastInput::List(Vec::new()));
            let _ = caster.cast_in(&field, Some("draft"));
        });

        let events = sink.events.borrow();
        assert_eq!(events.len(), 2);
        assert!(events[0].contains("NotNullable"));
        assert!(events[1].contains("In"));
    }

    #[test]
    fn global_sink_counts_per_field() {
        metrics::metrics_reset();

        let caster = AttributeCaster::new(registry());
        let field = FieldModel::scalar::<StatusEnum>("nullable_enum").nullable();

        caster.cast_out(&field, &CastInput::Null).unwrap();
        caster.cast_in(&field, Some("draft")).unwrap();
        caster
            .cast_out(&field, &CastInput::invalid(&3.5_f64))
            .unwrap_err();

        let snapshot = metrics::metrics_snapshot();
        assert_eq!(snapshot.ops.casts_out, 1);
        assert_eq!(snapshot.ops.nulls_out, 1);
        assert_eq!(snapshot.ops.casts_in, 1);
        assert_eq!(snapshot.ops.type_mismatches, 1);

        let counters = &snapshot.fields["nullable_enum"];
        assert_eq!(counters.casts_out, 1);
        assert_eq!(counters.casts_in, 1);
        assert_eq!(counters.rejections, 1);
    }
}
