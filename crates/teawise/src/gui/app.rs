use crate::config;
use crate::events::AppEvent;
use crate::gui::form::{
    self, FormEdit, RATING_STEP, ROUNDS_STEP, STEEP_TIME_STEP, WATER_TEMP_STEP, WEIGHT_STEP,
};
use crate::gui::theme;
use flavorwheel::geometry::{Point, WheelGeometry};
use flavorwheel::journal::record::{
    RATING_RANGE, ROUNDS_RANGE, STEEP_TIME_RANGE, WATER_TEMP_RANGE, WEIGHT_RANGE,
};
use flavorwheel::journal::{
    BREWING_METHODS, BrewParams, COMMON_FLAVORS, MemoryJournal, TEA_TYPES, TeaRecord,
};
use flavorwheel::wheel::{
    self, CursorAction, Label, RadialSelector, Selection, WheelConfiguration,
};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const WHEEL_SIZE: i32 = 420;

/// What the draw func needs. Shared with it, owned by the model.
pub struct WheelState {
    pub selector: RadialSelector,
    pub selected: Selection,
}

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub journal: MemoryJournal,
    pub draft: TeaRecord,
    pub status: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    CursorMove(Point),
    CursorLeave,
    Click(Point),
    ToggleFlavor(Label),
    SelectionChanged(Selection),
    Edit(FormEdit),
    Save,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn hover_caption(&self) -> String {
        self.state
            .borrow()
            .selector
            .hovered()
            .map_or_else(|| " ".to_string(), |label| label.to_string())
    }

    fn selection_caption(&self) -> String {
        let state = self.state.borrow();
        if state.selected.is_empty() {
            return "No flavors selected".to_string();
        }
        let labels: Vec<&str> = state.selected.iter().map(|l| l.as_str()).collect();
        labels.join("、")
    }

    fn redraw_if(&self, action: CursorAction) {
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }

    fn adopt_selection(&self, selected: Selection) {
        log::debug!("Selection: {:?}", selected.labels());
        self.state.borrow_mut().selected = selected;
        self.drawing_area.queue_draw();
    }

    fn save_record(&mut self) -> String {
        let mut record = self.draft.clone();
        record.flavor_tags = self.state.borrow().selected.clone();
        let name = record.name.clone();

        match self.journal.save(record) {
            Ok(id) => {
                self.adopt_selection(Selection::new());
                format!(
                    "Saved {} as tea #{} ({} records)",
                    name,
                    id,
                    self.journal.records().len()
                )
            }
            Err(e) => {
                log::warn!("Record not saved: {}", e);
                format!("Not saved: {}", e)
            }
        }
    }
}

fn spin_range(range: &std::ops::RangeInclusive<u32>) -> (f64, f64) {
    (f64::from(*range.start()), f64::from(*range.end()))
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        WheelConfiguration,
        MemoryJournal,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("TeaWise"),
            set_default_size: (WHEEL_SIZE + 360, WHEEL_SIZE + 160),

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 16,
                set_margin_top: 12,
                set_margin_bottom: 12,
                set_margin_start: 12,
                set_margin_end: 12,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 8,
                    set_hexpand: true,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_content_width: WHEEL_SIZE,
                        set_content_height: WHEEL_SIZE,
                        set_hexpand: true,
                        set_vexpand: true,
                        add_css_class: "teawise-wheel",

                        connect_resize[sender] => move |_, width, height| {
                            sender.input(AppMsg::Resize(width, height));
                        },

                        add_controller = gtk::EventControllerMotion {
                            connect_motion[sender] => move |_, x, y| {
                                sender.input(AppMsg::CursorMove(Point::new(x, y)));
                            },
                            connect_leave[sender] => move |_| {
                                sender.input(AppMsg::CursorLeave);
                            }
                        },

                        add_controller = gtk::GestureClick {
                            set_button: gtk::gdk::BUTTON_PRIMARY,
                            connect_released[sender] => move |_, _, x, y| {
                                sender.input(AppMsg::Click(Point::new(x, y)));
                            }
                        }
                    },

                    gtk::Label {
                        add_css_class: "teawise-hover",
                        #[watch]
                        set_label: &model.hover_caption(),
                    },

                    gtk::Label {
                        set_wrap: true,
                        #[watch]
                        set_label: &model.selection_caption(),
                    },

                    #[name = "quick_tags"]
                    gtk::FlowBox {
                        set_selection_mode: gtk::SelectionMode::None,
                        set_max_children_per_line: 8,
                    },
                },

                gtk::Grid {
                    set_row_spacing: 6,
                    set_column_spacing: 8,
                    set_valign: gtk::Align::Start,

                    attach[0, 0, 1, 1] = &gtk::Label {
                        set_label: "Name",
                        set_xalign: 0.0,
                    },
                    attach[1, 0, 1, 1] = &gtk::Entry {
                        set_placeholder_text: Some("Tea name"),
                        connect_changed[sender] => move |entry| {
                            sender.input(AppMsg::Edit(FormEdit::Name(entry.text().to_string())));
                        }
                    },

                    attach[0, 1, 1, 1] = &gtk::Label {
                        set_label: "Type",
                        set_xalign: 0.0,
                    },
                    attach[1, 1, 1, 1] = &gtk::DropDown::from_strings(TEA_TYPES) {
                        connect_selected_notify[sender] => move |dropdown| {
                            sender.input(AppMsg::Edit(FormEdit::TeaType(dropdown.selected())));
                        }
                    },

                    attach[0, 2, 1, 1] = &gtk::Label {
                        set_label: "Origin",
                        set_xalign: 0.0,
                    },
                    attach[1, 2, 1, 1] = &gtk::Entry {
                        connect_changed[sender] => move |entry| {
                            sender.input(AppMsg::Edit(FormEdit::Origin(entry.text().to_string())));
                        }
                    },

                    attach[0, 3, 1, 1] = &gtk::Label {
                        set_label: "Year",
                        set_xalign: 0.0,
                    },
                    attach[1, 3, 1, 1] = &gtk::Entry {
                        set_input_purpose: gtk::InputPurpose::Digits,
                        connect_changed[sender] => move |entry| {
                            sender.input(AppMsg::Edit(FormEdit::Year(entry.text().to_string())));
                        }
                    },

                    attach[0, 4, 1, 1] = &gtk::Label {
                        set_label: "Grade",
                        set_xalign: 0.0,
                    },
                    attach[1, 4, 1, 1] = &gtk::Entry {
                        connect_changed[sender] => move |entry| {
                            sender.input(AppMsg::Edit(FormEdit::Grade(entry.text().to_string())));
                        }
                    },

                    attach[0, 5, 1, 1] = &gtk::Label {
                        set_label: "Method",
                        set_xalign: 0.0,
                    },
                    attach[1, 5, 1, 1] = &gtk::DropDown::from_strings(BREWING_METHODS) {
                        connect_selected_notify[sender] => move |dropdown| {
                            sender.input(AppMsg::Edit(FormEdit::BrewingMethod(dropdown.selected())));
                        }
                    },

                    attach[0, 6, 1, 1] = &gtk::Label {
                        set_label: "Leaf (g)",
                        set_xalign: 0.0,
                    },
                    attach[1, 6, 1, 1] = &gtk::SpinButton::with_range(
                        *WEIGHT_RANGE.start(),
                        *WEIGHT_RANGE.end(),
                        WEIGHT_STEP,
                    ) {
                        set_digits: 1,
                        set_value: BrewParams::default().weight,
                        connect_value_changed[sender] => move |spin| {
                            sender.input(AppMsg::Edit(FormEdit::Weight(spin.value())));
                        }
                    },

                    attach[0, 7, 1, 1] = &gtk::Label {
                        set_label: "Water (°C)",
                        set_xalign: 0.0,
                    },
                    attach[1, 7, 1, 1] = &gtk::SpinButton::with_range(
                        spin_range(&WATER_TEMP_RANGE).0,
                        spin_range(&WATER_TEMP_RANGE).1,
                        WATER_TEMP_STEP,
                    ) {
                        set_value: f64::from(BrewParams::default().water_temp),
                        connect_value_changed[sender] => move |spin| {
                            sender.input(AppMsg::Edit(FormEdit::WaterTemp(spin.value())));
                        }
                    },

                    attach[0, 8, 1, 1] = &gtk::Label {
                        set_label: "Steep (s)",
                        set_xalign: 0.0,
                    },
                    attach[1, 8, 1, 1] = &gtk::SpinButton::with_range(
                        spin_range(&STEEP_TIME_RANGE).0,
                        spin_range(&STEEP_TIME_RANGE).1,
                        STEEP_TIME_STEP,
                    ) {
                        set_value: f64::from(BrewParams::default().steep_time),
                        connect_value_changed[sender] => move |spin| {
                            sender.input(AppMsg::Edit(FormEdit::SteepTime(spin.value())));
                        }
                    },

                    attach[0, 9, 1, 1] = &gtk::Label {
                        set_label: "Rounds",
                        set_xalign: 0.0,
                    },
                    attach[1, 9, 1, 1] = &gtk::SpinButton::with_range(
                        spin_range(&ROUNDS_RANGE).0,
                        spin_range(&ROUNDS_RANGE).1,
                        ROUNDS_STEP,
                    ) {
                        set_value: f64::from(BrewParams::default().rounds),
                        connect_value_changed[sender] => move |spin| {
                            sender.input(AppMsg::Edit(FormEdit::Rounds(spin.value())));
                        }
                    },

                    attach[0, 10, 1, 1] = &gtk::Label {
                        set_label: "Rating",
                        set_xalign: 0.0,
                    },
                    attach[1, 10, 1, 1] = &gtk::SpinButton::with_range(
                        *RATING_RANGE.start(),
                        *RATING_RANGE.end(),
                        RATING_STEP,
                    ) {
                        set_digits: 1,
                        set_value: TeaRecord::default().rating,
                        connect_value_changed[sender] => move |spin| {
                            sender.input(AppMsg::Edit(FormEdit::Rating(spin.value())));
                        }
                    },

                    attach[0, 11, 1, 1] = &gtk::Label {
                        set_label: "Notes",
                        set_xalign: 0.0,
                    },
                    attach[1, 11, 1, 1] = &gtk::Entry {
                        connect_changed[sender] => move |entry| {
                            sender.input(AppMsg::Edit(FormEdit::Notes(entry.text().to_string())));
                        }
                    },

                    attach[0, 12, 2, 1] = &gtk::Button {
                        set_label: "Save brewing record",
                        connect_clicked => AppMsg::Save,
                    },

                    attach[0, 13, 2, 1] = &gtk::Label {
                        add_css_class: "teawise-status",
                        set_wrap: true,
                        #[watch]
                        set_label: &model.status,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (wheel, journal, rx) = init;

        theme::load_css();

        let geometry = WheelGeometry::square(f64::from(WHEEL_SIZE));
        let state = Rc::new(RefCell::new(WheelState {
            selector: RadialSelector::new(wheel, geometry),
            selected: Selection::new(),
        }));

        let model = AppModel {
            state,
            status: format!("{} teas in journal", journal.teas().len()),
            journal,
            draft: form::initial_draft(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        for flavor in COMMON_FLAVORS {
            let button = gtk::Button::with_label(flavor);
            let sender = sender.clone();
            let label = Label::from(*flavor);
            button.connect_clicked(move |_| {
                sender.input(AppMsg::ToggleFlavor(label.clone()));
            });
            widgets.quick_tags.insert(&button, -1);
        }

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors = theme::wheel_theme(&drawing_area.style_context());
                let state = state_draw.borrow();
                if let Err(e) = wheel::draw(cr, &state.selector, &state.selected, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Resize(width, height) => {
                let action = self
                    .state
                    .borrow_mut()
                    .selector
                    .resize(f64::from(width), f64::from(height));
                self.redraw_if(action);
            }
            AppMsg::CursorMove(point) => {
                let action = self.state.borrow_mut().selector.update_cursor(point);
                self.redraw_if(action);
            }
            AppMsg::CursorLeave => {
                let action = self.state.borrow_mut().selector.leave();
                self.redraw_if(action);
            }
            AppMsg::Click(point) => {
                let state = self.state.borrow();
                state.selector.click_with(point, &state.selected, |next| {
                    sender.input(AppMsg::SelectionChanged(next));
                });
            }
            AppMsg::ToggleFlavor(label) => {
                let next = self.state.borrow().selected.toggled(&label);
                self.adopt_selection(next);
            }
            AppMsg::SelectionChanged(selected) => self.adopt_selection(selected),
            AppMsg::Edit(edit) => edit.apply(&mut self.draft),
            AppMsg::Save => self.status = self.save_record(),
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_wheel) => {
                    let mut state = self.state.borrow_mut();
                    let geometry = state.selector.geometry;
                    state.selector = RadialSelector::new(new_wheel, geometry);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config, keeping current wheel: {}", e),
            },
        }
    }
}
