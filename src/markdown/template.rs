//! Starter content for new plant articles

/// The article skeleton a new document starts from.
pub const PLANT_TEMPLATE: &str = "# Plant\n\
\n\
## Description\n\
Brief description of the plant.\n\
\n\
## Growing Conditions\n\
- Temperature: \n\
- Humidity: \n\
\n\
## Watering\n\
- Frequency: \n\
\n\
## Fertilizer\n\
- Fertilizer types: \n";
