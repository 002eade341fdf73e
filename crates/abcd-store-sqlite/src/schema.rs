//! Tables and columns read from an AddressBook database.
//!
//! Column order matters: row decoders address columns by position.

pub const RECORD: &str = "ZABCDRECORD";
pub const RECORD_COLUMNS: [&str; 18] = [
  "Z_PK",
  "ZFIRSTNAME",
  "ZLASTNAME",
  "ZMIDDLENAME",
  "ZTITLE",                // name prefix
  "ZSUFFIX",
  "ZNICKNAME",
  "ZMAIDENNAME",
  "ZPHONETICFIRSTNAME",
  "ZPHONETICMIDDLENAME",
  "ZPHONETICLASTNAME",
  "ZPHONETICORGANIZATION",
  "ZORGANIZATION",
  "ZDEPARTMENT",
  "ZJOBTITLE",
  "ZBIRTHDAY",             // Core Data timestamp
  "ZTHUMBNAILIMAGEDATA",
  "ZDISPLAYFLAGS",         // bit 0: show as company
];
/// Core Data entity id of a row; groups and contacts share the table.
pub const RECORD_ENTITY: &str = "Z_ENT";
/// Records outside any container are deleted or internal. Only used when
/// the contact entity id cannot be resolved.
pub const RECORD_CONTAINER: &str = "ZCONTAINER1";

/// Core Data's entity registry.
pub const PRIMARY_KEY: &str = "Z_PRIMARYKEY";
pub const PRIMARY_KEY_ENTITY: &str = "Z_ENT";
pub const PRIMARY_KEY_NAME: &str = "Z_NAME";
pub const CONTACT_ENTITY_NAME: &str = "ABCDContact";

pub const EMAIL: &str = "ZABCDEMAILADDRESS";
pub const EMAIL_COLUMNS: [&str; 3] = ["ZOWNER", "ZLABEL", "ZADDRESS"];

pub const PHONE: &str = "ZABCDPHONENUMBER";
pub const PHONE_COLUMNS: [&str; 3] = ["ZOWNER", "ZLABEL", "ZFULLNUMBER"];

pub const ADDRESS: &str = "ZABCDPOSTALADDRESS";
pub const ADDRESS_COLUMNS: [&str; 7] = [
  "ZOWNER",
  "ZLABEL",
  "ZSTREET",
  "ZCITY",
  "ZSTATE",
  "ZZIPCODE",
  "ZCOUNTRYNAME",
];

pub const SOCIAL: &str = "ZABCDSOCIALPROFILE";
pub const SOCIAL_COLUMNS: [&str; 3] = ["ZOWNER", "ZSERVICENAME", "ZUSERNAME"];

pub const NOTE: &str = "ZABCDNOTE";
pub const NOTE_COLUMNS: [&str; 2] = ["ZCONTACT", "ZTEXT"];

pub const URL: &str = "ZABCDURLADDRESS";
pub const URL_COLUMNS: [&str; 3] = ["ZOWNER", "ZLABEL", "ZURL"];

pub const MESSAGING: &str = "ZABCDMESSAGINGADDRESS";
pub const MESSAGING_COLUMNS: [&str; 3] = ["ZOWNER", "ZLABEL", "ZADDRESS"];
pub const MESSAGING_SERVICE_FK: &str = "ZSERVICE";

pub const SERVICE: &str = "ZABCDSERVICE";
pub const SERVICE_NAME: &str = "ZSERVICENAME";

/// Ordering shared by every labelled sub-entity table: owner, then the
/// primary entry, then the user's ordering.
pub const OWNER: &str = "ZOWNER";
pub const IS_PRIMARY: &str = "ZISPRIMARY";
pub const ORDERING_INDEX: &str = "ZORDERINGINDEX";
