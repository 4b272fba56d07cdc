mod selection;
mod util;
