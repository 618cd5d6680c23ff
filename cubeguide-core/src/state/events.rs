//! Events that trigger confirmation state transitions

/// Why a pending move was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CancelReason {
    /// The person asked to stop
    UserAbort,
    /// No visible progress for too long
    Inactivity,
    /// The camera went away
    SensorLost,
}

/// Evaluated inputs to the confirmation machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Detection failed; the window was emptied
    TrackingLost,
    /// A face was detected but the window does not confirm yet
    FaceSeen,
    /// The trailing detections all show the expected face
    TargetStable,
    /// Cancel from outside the machine
    Abort(CancelReason),
}
