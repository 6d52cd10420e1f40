// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Per component kind rules, as data.
//!
//! Cardinalities and value domains follow RFC 5545 Section 3.6.

use crate::component::ComponentKind;
use crate::keyword::{
    KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL, KW_CALSCALE_GREGORIAN,
    KW_STATUS_CANCELLED, KW_STATUS_COMPLETED, KW_STATUS_CONFIRMED, KW_STATUS_DRAFT,
    KW_STATUS_FINAL, KW_STATUS_IN_PROCESS, KW_STATUS_NEEDS_ACTION, KW_STATUS_TENTATIVE,
    KW_TRANSP_OPAQUE, KW_TRANSP_TRANSPARENT, KW_VERSION_2_0,
};
use crate::property::{PropertyKind, PropertyKind as P};

type Pair = (PropertyKind, PropertyKind);

/// What a component of one kind must and must not contain.
#[derive(Debug)]
pub(crate) struct Profile {
    /// Properties that must appear exactly once
    pub(crate) required: &'static [PropertyKind],

    /// Properties that may appear at most once
    pub(crate) optional: &'static [PropertyKind],

    /// Properties whose textual value is limited to a set, compared
    /// case-insensitively
    pub(crate) restricted: &'static [(PropertyKind, &'static [&'static str])],

    /// Pairs that must both be dates or both be date-times
    pub(crate) same_date_type: &'static [Pair],

    /// Start and end pairs; the end must not precede the start
    pub(crate) chronological: &'static [Pair],

    /// Pairs that must not both appear
    pub(crate) exclusive: &'static [Pair],

    /// The first property requires the second
    pub(crate) dependent: &'static [Pair],

    /// Pairs that appear together or not at all
    pub(crate) together: &'static [Pair],

    /// Whether RRULE is checked against DTSTART
    pub(crate) recurrence: bool,

    /// Each entry needs at least one child of any of the listed kinds
    pub(crate) subcomponents: &'static [&'static [ComponentKind]],
}

impl Profile {
    const fn empty() -> Self {
        Self {
            required: &[],
            optional: &[],
            restricted: &[],
            same_date_type: &[],
            chronological: &[],
            exclusive: &[],
            dependent: &[],
            together: &[],
            recurrence: false,
            subcomponents: &[],
        }
    }
}

/// The profile of a standard component kind.
pub(crate) fn profile(kind: ComponentKind) -> &'static Profile {
    match kind {
        ComponentKind::Calendar => &VCALENDAR,
        ComponentKind::Event => &VEVENT,
        ComponentKind::Todo => &VTODO,
        ComponentKind::Journal => &VJOURNAL,
        ComponentKind::FreeBusy => &VFREEBUSY,
        ComponentKind::TimeZone => &VTIMEZONE,
        ComponentKind::Standard | ComponentKind::Daylight => &OBSERVANCE,
        ComponentKind::Alarm => &VALARM,
    }
}

static VCALENDAR: Profile = Profile {
    required: &[P::ProdId, P::Version],
    optional: &[P::CalScale, P::Method],
    restricted: &[
        (P::Version, &[KW_VERSION_2_0]),
        (P::CalScale, &[KW_CALSCALE_GREGORIAN]),
    ],
    subcomponents: &[&[
        ComponentKind::Event,
        ComponentKind::Todo,
        ComponentKind::Journal,
        ComponentKind::FreeBusy,
        ComponentKind::TimeZone,
    ]],
    ..Profile::empty()
};

static VEVENT: Profile = Profile {
    required: &[P::Uid, P::DtStamp],
    optional: &[
        P::Class,
        P::Created,
        P::Description,
        P::DtStart,
        P::Geo,
        P::LastModified,
        P::Location,
        P::Organizer,
        P::Priority,
        P::Sequence,
        P::Status,
        P::Summary,
        P::Transp,
        P::Url,
        P::RecurrenceId,
        P::DtEnd,
        P::Duration,
    ],
    restricted: &[
        (
            P::Status,
            &[KW_STATUS_TENTATIVE, KW_STATUS_CONFIRMED, KW_STATUS_CANCELLED],
        ),
        (P::Transp, &[KW_TRANSP_OPAQUE, KW_TRANSP_TRANSPARENT]),
    ],
    same_date_type: &[(P::DtStart, P::DtEnd), (P::DtStart, P::RecurrenceId)],
    chronological: &[(P::DtStart, P::DtEnd)],
    exclusive: &[(P::DtEnd, P::Duration)],
    recurrence: true,
    ..Profile::empty()
};

static VTODO: Profile = Profile {
    required: &[P::Uid, P::DtStamp],
    optional: &[
        P::Class,
        P::Completed,
        P::Created,
        P::Description,
        P::DtStart,
        P::Geo,
        P::LastModified,
        P::Location,
        P::Organizer,
        P::PercentComplete,
        P::Priority,
        P::RecurrenceId,
        P::Sequence,
        P::Status,
        P::Summary,
        P::Url,
        P::Due,
        P::Duration,
    ],
    restricted: &[(
        P::Status,
        &[
            KW_STATUS_NEEDS_ACTION,
            KW_STATUS_COMPLETED,
            KW_STATUS_IN_PROCESS,
            KW_STATUS_CANCELLED,
        ],
    )],
    same_date_type: &[(P::DtStart, P::Due), (P::DtStart, P::RecurrenceId)],
    chronological: &[(P::DtStart, P::Due)],
    exclusive: &[(P::Due, P::Duration)],
    dependent: &[(P::Duration, P::DtStart)],
    recurrence: true,
    ..Profile::empty()
};

static VJOURNAL: Profile = Profile {
    required: &[P::Uid, P::DtStamp],
    optional: &[
        P::Class,
        P::Created,
        P::DtStart,
        P::LastModified,
        P::Organizer,
        P::RecurrenceId,
        P::Sequence,
        P::Status,
        P::Summary,
        P::Url,
    ],
    restricted: &[(
        P::Status,
        &[KW_STATUS_DRAFT, KW_STATUS_FINAL, KW_STATUS_CANCELLED],
    )],
    same_date_type: &[(P::DtStart, P::RecurrenceId)],
    recurrence: true,
    ..Profile::empty()
};

static VFREEBUSY: Profile = Profile {
    required: &[P::Uid, P::DtStamp],
    optional: &[P::Contact, P::DtStart, P::DtEnd, P::Organizer, P::Url],
    same_date_type: &[(P::DtStart, P::DtEnd)],
    chronological: &[(P::DtStart, P::DtEnd)],
    ..Profile::empty()
};

static VTIMEZONE: Profile = Profile {
    required: &[P::TzId],
    optional: &[P::LastModified, P::TzUrl],
    subcomponents: &[&[ComponentKind::Standard, ComponentKind::Daylight]],
    ..Profile::empty()
};

static OBSERVANCE: Profile = Profile {
    required: &[P::DtStart, P::TzOffsetTo, P::TzOffsetFrom],
    recurrence: true,
    ..Profile::empty()
};

static VALARM: Profile = Profile {
    required: &[P::Action, P::Trigger],
    optional: &[P::Duration, P::Repeat],
    restricted: &[(
        P::Action,
        &[KW_ACTION_AUDIO, KW_ACTION_DISPLAY, KW_ACTION_EMAIL],
    )],
    together: &[(P::Duration, P::Repeat)],
    ..Profile::empty()
};
