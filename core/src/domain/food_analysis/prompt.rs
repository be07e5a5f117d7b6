/// Instruction prompt sent with every image. Fixed so the tested request
/// shape is the sent request shape.
pub const ANALYSIS_PROMPT: &str = "You are a nutritional analysis expert. Analyze this food image and provide the following information:\n1) Food identification: What food item(s) is shown in the image?\n2) Estimated calories per serving\n3) Key nutritional benefits (proteins, vitamins, minerals, etc.)\n4) Potential allergens or dietary considerations\n\nFormat your response in clear, labeled sections with bullet points where appropriate.";
