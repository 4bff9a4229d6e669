/// Maximum number of characters accepted for an entity name
pub const NAME_MAX_LENGTH: usize = 255;

// =============================================================================
// VALIDATION MESSAGES
// =============================================================================

pub const MSG_NAME_REQUIRED: &str = "The name field is required.";

pub const MSG_NAME_STRING: &str = "The name must be a string.";

pub const MSG_NAME_MAX: &str = "The name may not be greater than 255 characters.";

pub const MSG_DESCRIPTION_STRING: &str = "The description must be a string.";

pub const MSG_IS_ACTIVE_BOOLEAN: &str = "The is active field must be true or false.";
