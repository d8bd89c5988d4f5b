use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Username for HTTP Basic authentication.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Option name used by the client configuration (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Password for HTTP Basic authentication.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Option name used by the client configuration (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// API access token for Bearer authentication.
///
/// Invariant: non-empty after trimming.
pub struct AccessToken(String);

impl AccessToken {
    /// Option name used by the client configuration (`accessToken`).
    pub const FIELD: &'static str = "accessToken";

    /// Create a validated [`AccessToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Client supplied message id (`clientMessageId`).
///
/// Echoed back in the send response and in delivery reports.
///
/// Invariant: non-empty after trimming.
pub struct ClientMessageId(String);

impl ClientMessageId {
    /// JSON field name used by websms (`clientMessageId`).
    pub const FIELD: &'static str = "clientMessageId";

    /// Create a validated [`ClientMessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender address shown to the recipient (`senderAddress`).
///
/// Invariant: non-empty after trimming. How it is interpreted depends on
/// [`SenderAddressType`](crate::domain::SenderAddressType).
pub struct SenderAddress(String);

impl SenderAddress {
    /// JSON field name used by websms (`senderAddress`).
    pub const FIELD: &'static str = "senderAddress";

    /// Create a validated [`SenderAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Text SMS body (`messageContent`).
///
/// Invariant: non-empty after trimming. The input (including whitespace) is preserved.
pub struct MessageContent(String);

impl MessageContent {
    /// JSON field name used by websms (`messageContent`).
    pub const FIELD: &'static str = "messageContent";

    /// Create validated message content.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message content as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// URL the vendor forwards delivery reports to (`notificationCallbackUrl`).
///
/// Invariant: absolute `http` or `https` URL.
pub struct NotificationCallbackUrl(url::Url);

impl NotificationCallbackUrl {
    /// JSON field name used by websms (`notificationCallbackUrl`).
    pub const FIELD: &'static str = "notificationCallbackUrl";

    /// Parse and validate a callback URL.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = value.as_ref().trim();
        if input.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let parsed = url::Url::parse(input).map_err(|_| ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: input.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl {
                field: Self::FIELD,
                input: input.to_owned(),
            });
        }
        Ok(Self(parsed))
    }

    /// Borrow the URL as serialized.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient MSISDN as sent to websms (`recipientAddressList` entry).
///
/// Invariant: non-empty after trimming. This type does not normalize; parse into
/// [`PhoneNumber`] and convert it when you want E.164 normalization.
pub struct RecipientAddress(String);

impl RecipientAddress {
    /// JSON field name used by websms (`recipientAddressList`).
    pub const FIELD: &'static str = "recipientAddressList";

    /// Create a validated (non-empty) recipient address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to websms.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RecipientAddress {
    /// MSISDNs are sent as E.164 digits without the leading `+`.
    fn from(value: PhoneNumber) -> Self {
        let digits = value.e164.trim_start_matches('+').to_owned();
        Self(digits)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// JSON field name used by websms (`recipientAddressList`).
    pub const FIELD: &'static str = "recipientAddressList";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Validity period for delivery attempts in seconds (`validityPeriode`).
///
/// Invariant: `60..=259200` (one minute to three days).
pub struct ValidityPeriod(u32);

impl ValidityPeriod {
    /// JSON field name used by websms (`validityPeriode`, vendor spelling).
    pub const FIELD: &'static str = "validityPeriode";

    /// Minimum allowed validity in seconds.
    pub const MIN: u32 = 60;
    /// Maximum allowed validity in seconds.
    pub const MAX: u32 = 259_200;

    /// Create a validated validity period.
    pub fn new(seconds: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&seconds) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: seconds,
            });
        }
        Ok(Self(seconds))
    }

    /// Get the validity in seconds.
    pub fn seconds(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// websms API status code (`statusCode`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by websms.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// Returns `true` if the request was accepted (sent or queued).
    pub fn is_success(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_success())
    }

    /// Returns `true` if this status code is considered retryable by the crate.
    pub fn is_retryable(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_retryable())
    }

    /// Returns `true` if this status code represents an authentication/authorization error.
    pub fn is_auth_error(self) -> bool {
        matches!(self.known(), Some(kind) if kind.is_auth_error())
    }
}

impl From<KnownStatusCode> for StatusCode {
    fn from(value: KnownStatusCode) -> Self {
        Self(value.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known websms status codes.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    Ok,
    OkQueued,
    InvalidCredentials,
    InvalidRecipient,
    InvalidSender,
    InvalidMessageType,
    InvalidMessageId,
    InvalidText,
    MsgLimitExceeded,
    UnauthorizedIp,
    InvalidMessagePriority,
    InvalidCodReturnAddress,
    ParameterMissing,
    InvalidAccount,
    AccessDenied,
    ThrottlingSpammingIp,
    ThrottlingTooManyRecipients,
    MaxSmsPerMessageExceeded,
    InvalidMessageSegment,
    RecipientsNotAllowed,
    RecipientsBlacklisted,
    SmsDisabled,
    InvalidContentCategory,
    InvalidValidityPeriod,
    RecipientsBlockedByQualityRating,
    RecipientsBlockedBySpamCheck,
    InternalError,
    ServiceUnavailable,
}

impl KnownStatusCode {
    /// Convert a raw websms integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            2000 => Self::Ok,
            2001 => Self::OkQueued,
            4001 => Self::InvalidCredentials,
            4002 => Self::InvalidRecipient,
            4003 => Self::InvalidSender,
            4004 => Self::InvalidMessageType,
            4008 => Self::InvalidMessageId,
            4009 => Self::InvalidText,
            4013 => Self::MsgLimitExceeded,
            4014 => Self::UnauthorizedIp,
            4015 => Self::InvalidMessagePriority,
            4016 => Self::InvalidCodReturnAddress,
            4019 => Self::ParameterMissing,
            4021 => Self::InvalidAccount,
            4022 => Self::AccessDenied,
            4023 => Self::ThrottlingSpammingIp,
            4025 => Self::ThrottlingTooManyRecipients,
            4026 => Self::MaxSmsPerMessageExceeded,
            4027 => Self::InvalidMessageSegment,
            4029 => Self::RecipientsNotAllowed,
            4031 => Self::RecipientsBlacklisted,
            4035 => Self::SmsDisabled,
            4040 => Self::InvalidContentCategory,
            4041 => Self::InvalidValidityPeriod,
            4042 => Self::RecipientsBlockedByQualityRating,
            4043 => Self::RecipientsBlockedBySpamCheck,
            5000 => Self::InternalError,
            5003 => Self::ServiceUnavailable,
            _ => return None,
        })
    }

    /// Integer code as used on the wire.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 2000,
            Self::OkQueued => 2001,
            Self::InvalidCredentials => 4001,
            Self::InvalidRecipient => 4002,
            Self::InvalidSender => 4003,
            Self::InvalidMessageType => 4004,
            Self::InvalidMessageId => 4008,
            Self::InvalidText => 4009,
            Self::MsgLimitExceeded => 4013,
            Self::UnauthorizedIp => 4014,
            Self::InvalidMessagePriority => 4015,
            Self::InvalidCodReturnAddress => 4016,
            Self::ParameterMissing => 4019,
            Self::InvalidAccount => 4021,
            Self::AccessDenied => 4022,
            Self::ThrottlingSpammingIp => 4023,
            Self::ThrottlingTooManyRecipients => 4025,
            Self::MaxSmsPerMessageExceeded => 4026,
            Self::InvalidMessageSegment => 4027,
            Self::RecipientsNotAllowed => 4029,
            Self::RecipientsBlacklisted => 4031,
            Self::SmsDisabled => 4035,
            Self::InvalidContentCategory => 4040,
            Self::InvalidValidityPeriod => 4041,
            Self::RecipientsBlockedByQualityRating => 4042,
            Self::RecipientsBlockedBySpamCheck => 4043,
            Self::InternalError => 5000,
            Self::ServiceUnavailable => 5003,
        }
    }

    /// Whether the request was accepted.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::OkQueued)
    }

    /// Whether this status is likely transient and can be retried.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::ThrottlingSpammingIp | Self::InternalError | Self::ServiceUnavailable
        )
    }

    /// Whether this status indicates invalid credentials or a blocked account.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::UnauthorizedIp
                | Self::InvalidAccount
                | Self::AccessDenied
        )
    }
}
