//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowLeft as Back, LuChevronRight as ChevronRight, LuCloud as Cloud,
        LuDownload as Download, LuFile as File, LuFolder as Folder, LuFolderPlus as FolderPlus,
        LuHouse as Home, LuImage as FileImage, LuLogOut as SignOut, LuTrash2 as Trash,
        LuUpload as Upload, LuUser as User, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowLeft as Back, BsBoxArrowRight as SignOut, BsChevronRight as ChevronRight,
        BsCloudFill as Cloud, BsDownload as Download, BsFileEarmark as File,
        BsFileEarmarkImage as FileImage, BsFolderFill as Folder, BsFolderPlus as FolderPlus,
        BsHouseFill as Home, BsPerson as User, BsTrash as Trash, BsUpload as Upload,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(BACK, Back);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CLOUD, Cloud);
themed_icon!(HOME, Home);
themed_icon!(FOLDER, Folder);
themed_icon!(FOLDER_PLUS, FolderPlus);
themed_icon!(FILE, File);
themed_icon!(FILE_IMAGE, FileImage);
themed_icon!(UPLOAD, Upload);
themed_icon!(DOWNLOAD, Download);
themed_icon!(TRASH, Trash);
themed_icon!(USER, User);
themed_icon!(SIGN_OUT, SignOut);
themed_icon!(CLOSE, Close);
