//! Diet, exercise and lifestyle recommendations
//!
//! Base lists depend on the predicted risk; BMI, exercise habits and
//! fast food consumption add or prepend items.

use super::request::PredictionRequest;
use super::result::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub desc: &'static str,
}

const fn rec(title: &'static str, desc: &'static str) -> Recommendation {
    Recommendation { title, desc }
}

const DIET_HIGH_RISK: &[Recommendation] = &[
    rec(
        "Low Glycemic Index Foods",
        "Focus on whole grains like quinoa, brown rice, and oats. These help manage insulin levels and reduce PCOS symptoms.",
    ),
    rec(
        "Anti-Inflammatory Foods",
        "Include fatty fish (salmon, mackerel), leafy greens, berries, and turmeric. These reduce inflammation associated with PCOS.",
    ),
    rec(
        "Lean Proteins",
        "Consume chicken breast, fish, eggs, legumes, and Greek yogurt to maintain stable blood sugar levels.",
    ),
    rec(
        "Healthy Fats",
        "Add avocados, nuts, seeds, and olive oil to your diet. These support hormone balance.",
    ),
    rec(
        "Avoid Processed Foods",
        "Limit refined carbs, sugary drinks, fried foods, and excessive caffeine which can worsen PCOS symptoms.",
    ),
    rec(
        "Fiber-Rich Foods",
        "Eat plenty of vegetables, fruits, and legumes to improve digestion and regulate blood sugar.",
    ),
];

const DIET_LOW_RISK: &[Recommendation] = &[
    rec(
        "Balanced Nutrition",
        "Maintain a balanced diet with whole grains, lean proteins, healthy fats, and plenty of fruits and vegetables.",
    ),
    rec(
        "Regular Meal Timing",
        "Eat at consistent times throughout the day to maintain stable energy and hormone levels.",
    ),
    rec(
        "Hydration",
        "Drink 8-10 glasses of water daily. Stay hydrated for optimal hormonal health.",
    ),
    rec(
        "Antioxidant-Rich Foods",
        "Include berries, dark leafy greens, and colorful vegetables to support overall health.",
    ),
    rec(
        "Limit Processed Foods",
        "Reduce intake of processed snacks, sugary drinks, and excessive salt for better health maintenance.",
    ),
];

const WEIGHT_MANAGEMENT: Recommendation = rec(
    "Weight Management",
    "Focus on portion control and calorie-dense nutrient-rich foods. Consider consulting a nutritionist for a personalized plan.",
);

const EXERCISE_HIGH_RISK: &[Recommendation] = &[
    rec(
        "Cardio Exercises (5 days/week)",
        "30-45 minutes of brisk walking, jogging, cycling, or swimming. This helps with insulin sensitivity and weight management.",
    ),
    rec(
        "Strength Training (3 days/week)",
        "Focus on bodyweight exercises, resistance bands, or light weights. Build muscle to improve metabolism and hormone balance.",
    ),
    rec(
        "Yoga & Stretching (Daily)",
        "Practice yoga poses like Butterfly, Cobra, and Child's pose. These reduce stress and improve hormonal balance.",
    ),
    rec(
        "High-Intensity Interval Training (2-3 days/week)",
        "Short bursts of intense exercise followed by rest. Excellent for improving insulin resistance.",
    ),
    rec(
        "Stress-Relief Activities",
        "Meditation, deep breathing exercises, or gentle walking. Stress management is crucial for PCOS management.",
    ),
    rec(
        "Consistency is Key",
        "Start slowly and gradually increase intensity. Even 15 minutes daily is better than nothing.",
    ),
];

const EXERCISE_LOW_RISK: &[Recommendation] = &[
    rec(
        "Regular Physical Activity",
        "Aim for 150 minutes of moderate exercise per week. This includes walking, jogging, or any activity you enjoy.",
    ),
    rec(
        "Strength Training",
        "Include 2-3 sessions per week to maintain muscle mass and bone health.",
    ),
    rec(
        "Flexibility Exercises",
        "Practice yoga or stretching to improve flexibility and reduce stress.",
    ),
    rec(
        "Stay Active Throughout the Day",
        "Take stairs, walk during breaks, and avoid prolonged sitting.",
    ),
    rec(
        "Fun Activities",
        "Dance, swim, play sports, or any activity that keeps you moving and motivated.",
    ),
];

const START_GRADUALLY: Recommendation = rec(
    "Start Gradually",
    "Begin with 10-15 minutes of light activity daily. Gradually increase duration and intensity over weeks.",
);

const LOW_IMPACT: Recommendation = rec(
    "Low-Impact Exercises",
    "Focus on swimming, cycling, or walking to protect joints while promoting weight loss. Consult a fitness professional.",
);

const LIFESTYLE_HIGH_RISK: &[Recommendation] = &[
    rec(
        "Sleep Quality (7-9 hours daily)",
        "Maintain a consistent sleep schedule. Poor sleep can worsen insulin resistance and hormonal imbalances in PCOS.",
    ),
    rec(
        "Stress Management",
        "Practice meditation, deep breathing, or mindfulness for 15-20 minutes daily. Chronic stress elevates cortisol, worsening PCOS symptoms.",
    ),
    rec(
        "Avoid Smoking & Alcohol",
        "Both smoking and excessive alcohol can increase insulin resistance and inflammation, making PCOS symptoms worse.",
    ),
    rec(
        "Regular Health Check-ups",
        "Monitor blood sugar, cholesterol, and hormone levels every 3-6 months. Early detection prevents complications.",
    ),
    rec(
        "Maintain Healthy Weight",
        "Even a 5-10% weight loss can significantly improve PCOS symptoms and restore regular periods.",
    ),
    rec(
        "Limit Screen Time Before Bed",
        "Avoid screens 1-2 hours before sleep. Blue light disrupts melatonin production and sleep quality.",
    ),
    rec(
        "Stay Hydrated",
        "Drink 8-10 glasses of water daily. Proper hydration supports metabolism and helps manage PCOS symptoms.",
    ),
    rec(
        "Build a Support System",
        "Join PCOS support groups or connect with others. Emotional support is crucial for managing chronic conditions.",
    ),
];

const LIFESTYLE_LOW_RISK: &[Recommendation] = &[
    rec(
        "Maintain Regular Sleep Schedule",
        "Aim for 7-9 hours of quality sleep each night. Consistent sleep helps maintain hormonal balance.",
    ),
    rec(
        "Stress Management Practices",
        "Incorporate relaxation techniques like yoga, meditation, or hobbies you enjoy to manage daily stress.",
    ),
    rec(
        "Limit Alcohol & Avoid Smoking",
        "Keep alcohol consumption moderate and avoid smoking to maintain optimal health.",
    ),
    rec(
        "Regular Health Screenings",
        "Get annual check-ups and preventive screenings to catch any issues early.",
    ),
    rec(
        "Maintain Active Lifestyle",
        "Stay physically active throughout the day. Take breaks from sitting, walk regularly, and stay engaged.",
    ),
    rec(
        "Social Connections",
        "Maintain strong social connections with family and friends. Good relationships support mental and physical health.",
    ),
    rec(
        "Work-Life Balance",
        "Create boundaries between work and personal time. Overwork and burnout negatively impact health.",
    ),
    rec(
        "Stay Hydrated",
        "Drink adequate water throughout the day for optimal body function and energy levels.",
    ),
];

const REDUCE_FAST_FOOD: Recommendation = rec(
    "Reduce Fast Food Consumption",
    "Gradually replace fast food with home-cooked meals. Plan and prep meals in advance to avoid unhealthy choices.",
);

const MINDFUL_EATING: Recommendation = rec(
    "Mindful Eating Practices",
    "Eat slowly, avoid distractions during meals, and listen to hunger cues. This helps prevent overeating and supports weight management.",
);

/// The three recommendation lists shown after an assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendations {
    pub diet: Vec<Recommendation>,
    pub exercise: Vec<Recommendation>,
    pub lifestyle: Vec<Recommendation>,
}

impl Recommendations {
    pub fn generate(request: &PredictionRequest, risk: RiskLevel) -> Self {
        Self {
            diet: diet(request, risk),
            exercise: exercise(request, risk),
            lifestyle: lifestyle(request, risk),
        }
    }
}

pub fn diet(request: &PredictionRequest, risk: RiskLevel) -> Vec<Recommendation> {
    let mut recs = match risk {
        RiskLevel::High => DIET_HIGH_RISK.to_vec(),
        RiskLevel::Low => DIET_LOW_RISK.to_vec(),
    };
    if request.bmi > 25.0 {
        recs.push(WEIGHT_MANAGEMENT);
    }
    recs
}

pub fn exercise(request: &PredictionRequest, risk: RiskLevel) -> Vec<Recommendation> {
    let mut recs = match risk {
        RiskLevel::High => EXERCISE_HIGH_RISK.to_vec(),
        RiskLevel::Low => EXERCISE_LOW_RISK.to_vec(),
    };
    if !request.flags.reg_exercise {
        recs.insert(0, START_GRADUALLY);
    }
    if request.bmi > 30.0 {
        recs.push(LOW_IMPACT);
    }
    recs
}

pub fn lifestyle(request: &PredictionRequest, risk: RiskLevel) -> Vec<Recommendation> {
    let mut recs = match risk {
        RiskLevel::High => LIFESTYLE_HIGH_RISK.to_vec(),
        RiskLevel::Low => LIFESTYLE_LOW_RISK.to_vec(),
    };
    if request.flags.fast_food {
        recs.push(REDUCE_FAST_FOOD);
    }
    if request.flags.weight_gain && request.bmi > 25.0 {
        recs.push(MINDFUL_EATING);
    }
    recs
}
